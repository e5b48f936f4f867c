use thiserror::Error;

use crate::placement::domain::placement_target::PlacementTarget;
use crate::shared::constants::{
    DEFAULT_TATTOO_SCALE, MAX_TATTOO_SCALE, MIN_TATTOO_SCALE, ROTATION_DEGREES_PER_SECOND,
};
use crate::shared::geometry::Vec3;

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("no tattoo design selected")]
    NoDesignSelected,
    #[error("unknown tattoo design: {0}")]
    UnknownDesign(String),
}

/// Sinusoidal scale animation applied to a decal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    /// Angular speed in radians per second.
    pub speed: f64,
    /// Relative amplitude; 0.1 swings the scale by ±10%.
    pub amount: f64,
}

/// A tattoo decal anchored in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Decal {
    pub design: Option<String>,
    pub position: Vec3,
    pub normal: Vec3,
    pub scale: f64,
    /// Spin about the surface normal, in degrees `[0, 360)`.
    pub rotation_degrees: f64,
    pub visible: bool,
    pub pulse: Option<Pulse>,
}

impl Decal {
    fn new(design: Option<String>, scale: f64) -> Self {
        Self {
            design,
            position: Vec3::ZERO,
            normal: Vec3::UP,
            scale,
            rotation_degrees: 0.0,
            visible: false,
            pulse: None,
        }
    }

    /// Displayed scale at time `t` seconds.
    pub fn pulse_scale(&self, t: f64) -> f64 {
        match self.pulse {
            Some(p) => self.scale * (1.0 + (t * p.speed).sin() * p.amount),
            None => self.scale,
        }
    }
}

/// Placement state for tattoo decals.
///
/// Holds the design library, the decal currently being positioned and the
/// decals already confirmed. Skin anchors arrive through
/// [`PlacementTarget::place_on_skin`]; touch-driven moves go through
/// [`TattooSession::move_active`].
pub struct TattooSession {
    designs: Vec<String>,
    selected: Option<String>,
    active: Option<Decal>,
    placed: Vec<Decal>,
    placing: bool,
    rotating: bool,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl TattooSession {
    pub fn new() -> Self {
        Self::with_scale_limits(MIN_TATTOO_SCALE, MAX_TATTOO_SCALE)
    }

    pub fn with_scale_limits(min_scale: f64, max_scale: f64) -> Self {
        Self {
            designs: Vec::new(),
            selected: None,
            active: None,
            placed: Vec::new(),
            placing: false,
            rotating: false,
            scale: DEFAULT_TATTOO_SCALE.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
        }
    }

    /// Adds a design to the library. Returns `false` if it was already there.
    pub fn add_design(&mut self, design: &str) -> bool {
        if self.designs.iter().any(|d| d == design) {
            return false;
        }
        self.designs.push(design.to_string());
        true
    }

    pub fn designs(&self) -> &[String] {
        &self.designs
    }

    pub fn selected_design(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects a library design and starts placing it.
    pub fn select_design(&mut self, design: &str) -> Result<(), SessionError> {
        if !self.designs.iter().any(|d| d == design) {
            return Err(SessionError::UnknownDesign(design.to_string()));
        }
        self.selected = Some(design.to_string());
        self.start_placement()
    }

    /// Enters placement mode with a hidden active decal.
    pub fn start_placement(&mut self) -> Result<(), SessionError> {
        let Some(design) = self.selected.clone() else {
            return Err(SessionError::NoDesignSelected);
        };
        let scale = self.scale;
        let decal = self
            .active
            .get_or_insert_with(|| Decal::new(Some(design), scale));
        decal.visible = false;
        self.placing = true;
        log::info!("Placement started");
        Ok(())
    }

    /// Moves the active decal while in placement mode. Returns `false` when
    /// there is nothing to move.
    pub fn move_active(&mut self, position: Vec3, normal: Vec3) -> bool {
        if !self.placing {
            return false;
        }
        match self.active.as_mut() {
            Some(decal) => {
                decal.position = position;
                decal.normal = normal;
                decal.visible = true;
                true
            }
            None => false,
        }
    }

    /// Commits the active decal to the placed list.
    pub fn confirm_placement(&mut self) -> bool {
        let Some(decal) = self.active.take() else {
            return false;
        };
        self.placed.push(decal);
        self.placing = false;
        log::info!("Tattoo placed ({} total)", self.placed.len());
        true
    }

    pub fn delete_active(&mut self) -> bool {
        if self.active.take().is_none() {
            return false;
        }
        self.placing = false;
        true
    }

    pub fn delete_all(&mut self) {
        self.placed.clear();
        self.active = None;
        self.placing = false;
    }

    /// Sets the decal scale, clamped to the session limits, and applies it
    /// to the active decal. Returns the value actually used.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
        if let Some(decal) = self.active.as_mut() {
            decal.scale = self.scale;
        }
        self.scale
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn toggle_rotation(&mut self) -> bool {
        self.rotating = !self.rotating;
        self.rotating
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn is_placing(&self) -> bool {
        self.placing
    }

    /// Advances time-based effects by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if !self.rotating {
            return;
        }
        if let Some(decal) = self.active.as_mut() {
            decal.rotation_degrees =
                (decal.rotation_degrees + ROTATION_DEGREES_PER_SECOND * dt).rem_euclid(360.0);
        }
    }

    pub fn active(&self) -> Option<&Decal> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut Decal> {
        self.active.as_mut()
    }

    pub fn placed(&self) -> &[Decal] {
        &self.placed
    }
}

impl Default for TattooSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementTarget for TattooSession {
    fn place_on_skin(&mut self, position: Vec3, normal: Vec3) {
        let (design, scale) = (self.selected.clone(), self.scale);
        let decal = self.active.get_or_insert_with(|| Decal::new(design, scale));
        decal.position = position;
        decal.normal = normal;
        decal.visible = true;
    }
}
