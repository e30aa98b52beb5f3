use bevy::prelude::*;

/// Page lifecycle: the loading overlay is up until the gate releases it.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Interactive,
}
