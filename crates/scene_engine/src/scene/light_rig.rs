//! Capped per-kind light stores and their distributors
//!
//! Every light kind has its own [`LightChannel`]: the held lights plus a
//! distributor that broadcasts the whole slice of held lights. Subscribed
//! shaders re-push every light at its own index and then the kind's count.
//! A separate distributor broadcasts all three counts at once.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::events::EventDistributor;
use crate::foundation::collections::TypedIndex;
use crate::foundation::math::Vec3;
use crate::render::lighting::upload_lights;
use crate::render::{DirectionalLight, Light, LightCounts, LightKind, PointLight, Shader, SpotLight};

/// Stable handle of a light held by a scene (lights are never removed)
pub type LightHandle<L> = TypedIndex<L>;

/// Handle of a light added through the [`Light`] enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightId {
    /// Point light handle
    Point(LightHandle<PointLight>),
    /// Spot light handle
    Spot(LightHandle<SpotLight>),
    /// Directional light handle
    Directional(LightHandle<DirectionalLight>),
}

impl LightId {
    /// Typed handle if this is a point light
    pub const fn point(self) -> Option<LightHandle<PointLight>> {
        match self {
            Self::Point(handle) => Some(handle),
            _ => None,
        }
    }

    /// Typed handle if this is a spot light
    pub const fn spot(self) -> Option<LightHandle<SpotLight>> {
        match self {
            Self::Spot(handle) => Some(handle),
            _ => None,
        }
    }

    /// Typed handle if this is a directional light
    pub const fn directional(self) -> Option<LightHandle<DirectionalLight>> {
        match self {
            Self::Directional(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Held lights of one kind plus the distributor announcing them
#[derive(Debug)]
pub struct LightChannel<L: LightKind> {
    lights: Vec<L>,
    distributor: EventDistributor<[L]>,
}

impl<L: LightKind> LightChannel<L> {
    fn new() -> Self {
        Self {
            lights: Vec::with_capacity(L::MAX),
            distributor: EventDistributor::new(),
        }
    }

    /// Held lights in insertion order
    pub fn lights(&self) -> &[L] {
        &self.lights
    }

    /// Number of subscribed shaders
    pub fn subscriber_count(&self) -> usize {
        self.distributor.len()
    }

    fn broadcast(&self) {
        self.distributor.notify(&self.lights);
    }

    fn subscribe_shader(&self, shader: Rc<dyn Shader>) {
        self.distributor
            .subscribe(move |lights: &[L]| upload_lights(shader.as_ref(), lights));
    }
}

/// Maps a light kind to its channel inside a [`LightRig`]
pub trait StoredLight: LightKind {
    /// Channel holding this kind
    fn channel(rig: &LightRig) -> &LightChannel<Self>;

    /// Mutable channel holding this kind
    fn channel_mut(rig: &mut LightRig) -> &mut LightChannel<Self>;
}

impl StoredLight for PointLight {
    fn channel(rig: &LightRig) -> &LightChannel<Self> {
        &rig.point
    }

    fn channel_mut(rig: &mut LightRig) -> &mut LightChannel<Self> {
        &mut rig.point
    }
}

impl StoredLight for SpotLight {
    fn channel(rig: &LightRig) -> &LightChannel<Self> {
        &rig.spot
    }

    fn channel_mut(rig: &mut LightRig) -> &mut LightChannel<Self> {
        &mut rig.spot
    }
}

impl StoredLight for DirectionalLight {
    fn channel(rig: &LightRig) -> &LightChannel<Self> {
        &rig.directional
    }

    fn channel_mut(rig: &mut LightRig) -> &mut LightChannel<Self> {
        &mut rig.directional
    }
}

/// All light stores of a scene
#[derive(Debug)]
pub struct LightRig {
    point: LightChannel<PointLight>,
    spot: LightChannel<SpotLight>,
    directional: LightChannel<DirectionalLight>,
    counts: EventDistributor<LightCounts>,
    generation: u64,
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

impl LightRig {
    /// Create empty stores
    pub fn new() -> Self {
        Self {
            point: LightChannel::new(),
            spot: LightChannel::new(),
            directional: LightChannel::new(),
            counts: EventDistributor::new(),
            generation: 0,
        }
    }

    /// Add a light of a known kind; `None` (and a warning) once the kind is full
    pub fn add<L: StoredLight>(&mut self, light: L) -> Option<LightHandle<L>> {
        let channel = L::channel_mut(self);
        if channel.lights.len() >= L::MAX {
            log::warn!(
                "Maximum number of {} lights ({}) reached, ignoring light",
                L::KIND_NAME,
                L::MAX
            );
            return None;
        }

        channel.lights.push(light);
        let handle = LightHandle::new(channel.lights.len() - 1);
        channel.broadcast();
        self.generation += 1;
        log::debug!("Added {} light #{}", L::KIND_NAME, handle.index());
        Some(handle)
    }

    /// Add any light variant
    pub fn add_light(&mut self, light: Light) -> Option<LightId> {
        match light {
            Light::Point(light) => self.add(light).map(LightId::Point),
            Light::Spot(light) => self.add(light).map(LightId::Spot),
            Light::Directional(light) => self.add(light).map(LightId::Directional),
        }
    }

    /// Held lights of one kind
    pub fn lights<L: StoredLight>(&self) -> &[L] {
        L::channel(self).lights()
    }

    /// Channel of one kind
    pub fn channel<L: StoredLight>(&self) -> &LightChannel<L> {
        L::channel(self)
    }

    /// Light behind `handle`
    pub fn get<L: StoredLight>(&self, handle: LightHandle<L>) -> Option<&L> {
        L::channel(self).lights.get(handle.index())
    }

    /// Mutable access that re-announces the light's kind when dropped
    pub fn light_mut<L: StoredLight>(&mut self, handle: LightHandle<L>) -> Option<LightMut<'_, L>> {
        if handle.index() >= L::channel(self).lights.len() {
            return None;
        }
        Some(LightMut {
            rig: self,
            index: handle.index(),
            _kind: PhantomData,
        })
    }

    /// Re-announce the kind of `handle` without changing anything
    pub fn invoke<L: StoredLight>(&self, handle: LightHandle<L>) -> bool {
        let channel = L::channel(self);
        if handle.index() >= channel.lights.len() {
            return false;
        }
        channel.broadcast();
        true
    }

    /// Held light counts
    pub fn counts(&self) -> LightCounts {
        LightCounts {
            point: self.point.lights.len(),
            spot: self.spot.lights.len(),
            directional: self.directional.lights.len(),
        }
    }

    /// Monotonic counter bumped on every light addition or mutation
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Subscribe a shader to every light kind and to the counts; pushes the current counts at once
    pub fn subscribe_shader(&self, shader: &Rc<dyn Shader>) {
        self.point.subscribe_shader(Rc::clone(shader));
        self.spot.subscribe_shader(Rc::clone(shader));
        self.directional.subscribe_shader(Rc::clone(shader));

        let counts_shader = Rc::clone(shader);
        self.counts
            .subscribe(move |counts: &LightCounts| counts.upload(counts_shader.as_ref()));

        self.counts().upload(shader.as_ref());
    }

    /// One broadcast per held light of each kind, then the counts
    pub fn invoke_all(&self) {
        for _ in &self.point.lights {
            self.point.broadcast();
        }
        for _ in &self.spot.lights {
            self.spot.broadcast();
        }
        for _ in &self.directional.lights {
            self.directional.broadcast();
        }
        self.counts.notify(&self.counts());
    }

    /// Move every spot light to `position`, pointing along `direction`, and re-announce them
    pub fn set_spot_poses(&mut self, position: Vec3, direction: Vec3) {
        if self.spot.lights.is_empty() {
            return;
        }
        for light in &mut self.spot.lights {
            light.position = position;
            light.direction = direction;
        }
        self.generation += 1;
        self.spot.broadcast();
    }
}

/// Guard giving mutable access to a held light
///
/// Dropping the guard announces the light's kind through its distributor,
/// so subscribed shaders always see the latest values.
pub struct LightMut<'a, L: StoredLight> {
    rig: &'a mut LightRig,
    index: usize,
    _kind: PhantomData<L>,
}

impl<L: StoredLight> Deref for LightMut<'_, L> {
    type Target = L;

    fn deref(&self) -> &L {
        &L::channel(&*self.rig).lights[self.index]
    }
}

impl<L: StoredLight> DerefMut for LightMut<'_, L> {
    fn deref_mut(&mut self) -> &mut L {
        &mut L::channel_mut(&mut *self.rig).lights[self.index]
    }
}

impl<L: StoredLight> Drop for LightMut<'_, L> {
    fn drop(&mut self) {
        self.rig.generation += 1;
        L::channel(&*self.rig).broadcast();
        log::trace!("{} light #{} changed", L::KIND_NAME, self.index);
    }
}
