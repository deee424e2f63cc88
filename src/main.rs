use bevy::prelude::*;

mod absence;
mod core;
mod pet;
mod player;
mod ui;

use crate::{
    absence::AbsencePlugin, core::CorePlugin, pet::PetPlugin, player::PlayerPlugin, ui::UiPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            PetPlugin,
            AbsencePlugin, // After PetPlugin: catch-up mutates the pet registry
            PlayerPlugin,
            UiPlugin,
        ))
        .run();
}
