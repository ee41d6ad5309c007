//! Tutorial step table and the rules driving the onboarding UI.

/// localStorage keys gating the two one-shot presentations.
pub const WELCOME_SEEN_KEY: &str = "cumbre_welcome_seen";
pub const TUTORIAL_SEEN_KEY: &str = "cumbre_tutorial_seen";

/// Viewports narrower than this use the mobile illustration.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Minimum horizontal drag distance for a swipe to count.
pub const SWIPE_MIN_PX: f64 = 50.0;

pub struct TutorialStep {
    pub title: &'static str,
    pub description: &'static str,
    pub gif_mobile: &'static str,
    pub gif_desktop: &'static str,
}

pub const TUTORIAL_STEPS: [TutorialStep; 4] = [
    TutorialStep {
        title: "Agregar una nueva meta",
        description: "Toca el boton + que esta en la esquina inferior derecha. \
            Alli podras escribir el nombre de tu meta, agregar detalles y ponerle \
            una fecha limite si quieres.",
        gif_mobile: "assets/gifs/mobile/step-1-add.gif",
        gif_desktop: "assets/gifs/desktop/step-1-add.gif",
    },
    TutorialStep {
        title: "Marcar como completada",
        description: "Toca una meta para desplegar sus opciones y luego presiona \
            \"Completada\". La meta quedara tachada para que sepas que ya la lograste.",
        gif_mobile: "assets/gifs/mobile/step-2-complete.gif",
        gif_desktop: "assets/gifs/desktop/step-2-complete.gif",
    },
    TutorialStep {
        title: "Editar una meta",
        description: "Si quieres cambiar el nombre, los detalles o la fecha limite \
            de una meta, toca la meta y luego presiona \"Editar\". Haz tus cambios y guarda.",
        gif_mobile: "assets/gifs/mobile/step-3-edit.gif",
        gif_desktop: "assets/gifs/desktop/step-3-edit.gif",
    },
    TutorialStep {
        title: "Borrar una meta",
        description: "Para eliminar una meta que ya no necesitas, toca la meta, \
            presiona \"Eliminar\" y confirma. Recuerda que esta accion no se puede deshacer.",
        gif_mobile: "assets/gifs/mobile/step-4-delete.gif",
        gif_desktop: "assets/gifs/desktop/step-4-delete.gif",
    },
];

impl TutorialStep {
    /// Pick the asset for the current viewport. Evaluated per step
    /// render, never cached, so a resize between steps takes effect.
    pub fn illustration(&self, viewport_width: u32) -> &'static str {
        if viewport_width < MOBILE_BREAKPOINT_PX {
            self.gif_mobile
        } else {
            self.gif_desktop
        }
    }
}

/// Direction of a step transition, for the slide animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    Forward,
    Back,
}

pub fn step_after(current: usize) -> Option<usize> {
    (current + 1 < TUTORIAL_STEPS.len()).then_some(current + 1)
}

pub fn step_before(current: usize) -> Option<usize> {
    current.checked_sub(1)
}

pub fn is_last_step(index: usize) -> bool {
    index + 1 == TUTORIAL_STEPS.len()
}

/// Interpret a horizontal drag. `delta_x` is start minus end, so a
/// positive value is a leftward swipe (advance). Short drags below
/// [`SWIPE_MIN_PX`] are ignored.
pub fn swipe_direction(delta_x: f64) -> Option<SlideDirection> {
    if delta_x.abs() < SWIPE_MIN_PX {
        None
    } else if delta_x > 0.0 {
        Some(SlideDirection::Forward)
    } else {
        Some(SlideDirection::Back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_walk_forward_and_back_within_bounds() {
        assert_eq!(step_after(0), Some(1));
        assert_eq!(step_after(TUTORIAL_STEPS.len() - 1), None);
        assert_eq!(step_before(0), None);
        assert_eq!(step_before(2), Some(1));
        assert!(is_last_step(TUTORIAL_STEPS.len() - 1));
        assert!(!is_last_step(0));
    }

    #[test]
    fn short_drags_are_ignored() {
        assert_eq!(swipe_direction(0.0), None);
        assert_eq!(swipe_direction(49.9), None);
        assert_eq!(swipe_direction(-49.9), None);
    }

    #[test]
    fn long_drags_advance_or_retreat() {
        assert_eq!(swipe_direction(50.0), Some(SlideDirection::Forward));
        assert_eq!(swipe_direction(120.0), Some(SlideDirection::Forward));
        assert_eq!(swipe_direction(-50.0), Some(SlideDirection::Back));
    }

    #[test]
    fn illustration_follows_the_breakpoint() {
        let step = &TUTORIAL_STEPS[0];
        assert_eq!(step.illustration(320), step.gif_mobile);
        assert_eq!(step.illustration(767), step.gif_mobile);
        assert_eq!(step.illustration(768), step.gif_desktop);
        assert_eq!(step.illustration(1440), step.gif_desktop);
    }
}
