//! In-memory [`RenderTree`] that records what the engine asks of it.
//!
//! Useful for dumping keyframes without a display and for driving transitions in tests.

use std::{collections::BTreeMap, time::Duration};

use crate::{
    animation::keyframes::KeyframeSequence,
    foundation::core::{DMat4, Rect},
    geometry::FoldPose,
    transition::engine::RenderTree,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SurfaceId(pub u32);

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ProxyId(pub u32);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeadlessSurface {
    pub bounds: Rect,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeadlessProxy {
    pub source: SurfaceId,
    pub region: Rect,
    pub keyframes: Option<KeyframeSequence>,
}

#[derive(Debug, Default)]
pub struct HeadlessTree {
    surfaces: BTreeMap<SurfaceId, HeadlessSurface>,
    proxies: BTreeMap<ProxyId, HeadlessProxy>,
    next_surface: u32,
    next_proxy: u32,
    plays: Vec<Duration>,
}

impl HeadlessTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_surface(&mut self, bounds: Rect) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(
            id,
            HeadlessSurface {
                bounds,
                visible: true,
            },
        );
        id
    }

    /// Detach a surface. Its bounds read as empty afterwards.
    pub fn remove_surface(&mut self, id: SurfaceId) -> Option<HeadlessSurface> {
        self.surfaces.remove(&id)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&HeadlessSurface> {
        self.surfaces.get(&id)
    }

    pub fn proxy(&self, id: ProxyId) -> Option<&HeadlessProxy> {
        self.proxies.get(&id)
    }

    pub fn proxies(&self) -> impl Iterator<Item = (ProxyId, &HeadlessProxy)> {
        self.proxies.iter().map(|(id, p)| (*id, p))
    }

    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    /// Durations passed to [`RenderTree::play`], oldest first.
    pub fn plays(&self) -> &[Duration] {
        &self.plays
    }

    /// Pose of a proxy at normalized time `key_time`, if it has keyframes attached.
    pub fn pose_at(&self, id: ProxyId, key_time: f64) -> Option<FoldPose> {
        let seq = self.proxies.get(&id)?.keyframes.as_ref()?;
        Some(seq.sample(key_time))
    }

    /// Transform attached to a proxy's key `index`.
    pub fn key_transform(&self, id: ProxyId, index: usize) -> Option<DMat4> {
        let seq = self.proxies.get(&id)?.keyframes.as_ref()?;
        seq.keys.get(index).map(|k| k.transform)
    }
}

impl RenderTree for HeadlessTree {
    type Surface = SurfaceId;
    type Proxy = ProxyId;

    fn bounds(&self, surface: SurfaceId) -> Rect {
        self.surfaces
            .get(&surface)
            .map_or(Rect::ZERO, |s| s.bounds)
    }

    fn create_proxy(&mut self, source: SurfaceId, region: Rect) -> ProxyId {
        let id = ProxyId(self.next_proxy);
        self.next_proxy += 1;
        self.proxies.insert(
            id,
            HeadlessProxy {
                source,
                region,
                keyframes: None,
            },
        );
        id
    }

    fn attach_keyframes(&mut self, proxy: ProxyId, keyframes: &KeyframeSequence) {
        if let Some(p) = self.proxies.get_mut(&proxy) {
            p.keyframes = Some(keyframes.clone());
        }
    }

    fn destroy_proxy(&mut self, proxy: ProxyId) {
        self.proxies.remove(&proxy);
    }

    fn set_visible(&mut self, surface: SurfaceId, visible: bool) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.visible = visible;
        }
    }

    fn play(&mut self, duration: Duration) {
        self.plays.push(duration);
    }
}
