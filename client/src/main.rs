// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod arena;
mod camera;
mod car;
mod config;
mod hud;
mod input;
mod physics;

use bevy::prelude::*;
use shared::FIXED_HZ;

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;
impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Duel Drive".to_string(),
                fit_canvas_to_parent: true,
                ..default()
            }
            .into(),
            ..default()
        }));

        // The car controllers and the rapier pipeline share one fixed tick.
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));

        app.add_plugins((
            config::plugin,
            physics::plugin,
            arena::plugin,
            car::plugin,
            input::plugin,
            camera::plugin,
            hud::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
