//! Player movement from held input.

use bugstorm_core::commands::InputState;
use bugstorm_core::constants::DIAGONAL_FACTOR;
use bugstorm_core::player::Player;

/// Move the player by its speed along the held direction and keep it fully
/// inside the world.
pub fn run(player: &mut Player, input: &InputState, width: f64, height: f64) {
    let (mut dx, mut dy) = input.axes();
    if dx != 0.0 && dy != 0.0 {
        dx *= DIAGONAL_FACTOR;
        dy *= DIAGONAL_FACTOR;
    }

    let r = player.radius;
    let p = &mut player.position;
    p.x = (p.x + dx * player.speed).clamp(r, (width - r).max(r));
    p.y = (p.y + dy * player.speed).clamp(r, (height - r).max(r));
}
