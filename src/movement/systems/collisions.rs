//! Movement domain: grounded detection along the active panel's down vector.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::MovementTuning;
use crate::movement::{GameLayer, Player, PlayerMotion};
use crate::panels::{ActivePanel, Panel, active_panel_rotation};

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    active_panel: Res<ActivePanel>,
    panels: Query<(&Panel, &GlobalTransform)>,
    mut query: Query<(&Transform, &Collider, &mut PlayerMotion), With<Player>>,
) {
    // Filter to only hit Ground layer entities (not door sensors)
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let rotation = active_panel_rotation(&active_panel, &panels);
    let down = (rotation * Vec3::NEG_Y).truncate();
    let Ok(direction) = Dir2::new(down) else {
        return;
    };

    for (transform, collider, mut motion) in &mut query {
        let was_on_ground = motion.on_ground;

        let player_half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };

        // Cast a short ray from the player's feet
        let ray_origin = transform.translation.truncate() + down * player_half_height;
        let hit = spatial_query.cast_ray(
            ray_origin,
            direction,
            tuning.ground_probe,
            true,
            &ground_filter,
        );

        motion.on_ground = hit.is_some();

        if motion.on_ground != was_on_ground {
            debug!("Grounded changed: on_ground={}", motion.on_ground);
        }
    }
}
