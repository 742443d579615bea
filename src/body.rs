#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Num, OrbitError, StateVectors, StaticOrbit, Vec2};

/// Index of a body inside a [`BodySet`]. Index 0 is always the primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub usize);

impl BodyId {
    pub const PRIMARY: BodyId = BodyId(0);
}

/// What an object in the simulation can do, in place of a type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub has_engine: bool,
    pub has_static_orbit: bool,
}

/// A mass that bends trajectories: a star or a planet.
///
/// `position` and `velocity` are relative to the parent body. For children
/// of the primary that is the world frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GravitatingBody {
    name: String,
    mu: Num,
    physical_radius: Num,
    sphere_of_influence: Num,
    /// Display size, which may exaggerate the physical radius
    render_radius: Num,
    parent: Option<BodyId>,
    state: StateVectors,
    static_orbit: Option<StaticOrbit>,
}

impl GravitatingBody {
    pub fn new(
        name: impl Into<String>,
        mu: Num,
        physical_radius: Num,
        sphere_of_influence: Num,
    ) -> Result<Self, OrbitError> {
        let name = name.into();

        if !(mu > 0.0) {
            return Err(OrbitError::InvalidBody(format!("{name}: mu must be positive")));
        }
        if !(physical_radius >= 0.0) {
            return Err(OrbitError::InvalidBody(format!(
                "{name}: radius must not be negative"
            )));
        }
        if !(sphere_of_influence > physical_radius) {
            return Err(OrbitError::InvalidBody(format!(
                "{name}: sphere of influence ({sphere_of_influence}) must exceed the radius ({physical_radius})"
            )));
        }

        Ok(Self {
            name,
            mu,
            physical_radius,
            sphere_of_influence,
            render_radius: physical_radius,
            parent: None,
            state: StateVectors::default(),
            static_orbit: None,
        })
    }

    /// Puts the body on a fixed ellipse around `parent`.
    pub fn with_static_orbit(mut self, parent: BodyId, orbit: StaticOrbit) -> Self {
        self.state = orbit.state_vectors();
        self.parent = Some(parent);
        self.static_orbit = Some(orbit);
        self
    }

    pub fn with_render_radius(mut self, render_radius: Num) -> Self {
        self.render_radius = render_radius;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mu(&self) -> Num {
        self.mu
    }

    pub fn physical_radius(&self) -> Num {
        self.physical_radius
    }

    pub fn sphere_of_influence(&self) -> Num {
        self.sphere_of_influence
    }

    pub fn render_radius(&self) -> Num {
        self.render_radius
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    pub fn state_vectors(&self) -> &StateVectors {
        &self.state
    }

    pub fn static_orbit(&self) -> Option<&StaticOrbit> {
        self.static_orbit.as_ref()
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            has_engine: false,
            has_static_orbit: self.static_orbit.is_some(),
        }
    }

    pub fn advance(&mut self, dt: Num) {
        if let Some(orbit) = self.static_orbit.as_mut() {
            orbit.advance(dt);
            self.state = orbit.state_vectors();
        }
    }

    pub fn reset(&mut self) {
        if let Some(orbit) = self.static_orbit.as_mut() {
            orbit.reset();
            self.state = orbit.state_vectors();
        }
    }
}

/// Arena of every gravitating body, primary first.
#[derive(Debug, Clone)]
pub struct BodySet {
    bodies: Vec<GravitatingBody>,
}

impl BodySet {
    pub fn new(mut primary: GravitatingBody) -> Self {
        primary.parent = None;
        primary.static_orbit = None;
        primary.state = StateVectors::default();

        Self {
            bodies: vec![primary],
        }
    }

    pub fn add(&mut self, body: GravitatingBody) -> Result<BodyId, OrbitError> {
        let parent = body.parent.ok_or_else(|| {
            OrbitError::InvalidBody(format!("{}: only the primary may lack a parent", body.name))
        })?;
        self.get(parent)?;

        self.bodies.push(body);

        Ok(BodyId(self.bodies.len() - 1))
    }

    pub fn get(&self, id: BodyId) -> Result<&GravitatingBody, OrbitError> {
        self.bodies.get(id.0).ok_or(OrbitError::UnknownBody(id))
    }

    pub fn primary(&self) -> &GravitatingBody {
        &self.bodies[BodyId::PRIMARY.0]
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &GravitatingBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Bodies orbiting directly inside the sphere of influence of `id`.
    pub fn children(&self, id: BodyId) -> impl Iterator<Item = (BodyId, &GravitatingBody)> {
        self.iter().filter(move |(_, b)| b.parent == Some(id))
    }

    /// Position relative to the primary, summed up the parent chain.
    pub fn world_position(&self, id: BodyId) -> Result<Vec2, OrbitError> {
        let mut position = Vec2::ZERO;
        let mut current = Some(id);

        while let Some(id) = current {
            let body = self.get(id)?;
            position += body.position();
            current = body.parent;
        }

        Ok(position)
    }

    pub fn advance(&mut self, dt: Num) {
        for body in self.bodies.iter_mut() {
            body.advance(dt);
        }
    }

    pub fn reset(&mut self) {
        for body in self.bodies.iter_mut() {
            body.reset();
        }
    }
}
