//! Progression: level-up offers, applying upgrades and boss defeat.

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use bugstorm_core::components::{Boss, Health, Pickup};
use bugstorm_core::constants::*;
use bugstorm_core::enums::WeaponKind;
use bugstorm_core::events::SoundEvent;
use bugstorm_core::player::Player;
use bugstorm_core::types::Position;
use bugstorm_core::upgrades::{Upgrade, UpgradeCategory, STAT_BOOSTS};

use crate::session::SessionState;
use crate::world_setup;

/// Weapon unlocks the player qualifies for and does not own yet.
pub fn available_unlocks(player: &Player) -> Vec<Upgrade> {
    WeaponKind::UNLOCKABLE
        .into_iter()
        .filter(|kind| !player.has_unlocked(*kind))
        .filter(|kind| kind.unlock_level().is_some_and(|lvl| player.level >= lvl))
        .map(Upgrade::UnlockWeapon)
        .collect()
}

/// Level-ups for owned weapons below the level cap.
pub fn available_weapon_upgrades(player: &Player) -> Vec<Upgrade> {
    player
        .weapons
        .iter()
        .filter(|w| w.can_level_up())
        .map(|w| Upgrade::UpgradeWeapon(w.kind))
        .collect()
}

/// Draw up to three distinct offers.
///
/// One unlock is preferred while the player is at most level 15. One stat
/// boost follows, skipping attack-speed boosts if the previous offered set
/// contained one. The rest are filled from the whole pool.
pub fn generate_offers<R: Rng + ?Sized>(
    player: &Player,
    last_categories: &[UpgradeCategory],
    rng: &mut R,
) -> Vec<Upgrade> {
    let unlocks = available_unlocks(player);
    let weapon_upgrades = available_weapon_upgrades(player);
    let mut selected: Vec<Upgrade> = Vec::with_capacity(UPGRADE_OFFER_COUNT);

    if player.level <= UNLOCK_PRIORITY_MAX_LEVEL {
        if let Some(unlock) = unlocks.choose(rng) {
            selected.push(*unlock);
        }
    }

    let avoid_attack_speed = last_categories.contains(&UpgradeCategory::AttackSpeed);
    let stat_pool: Vec<Upgrade> = STAT_BOOSTS
        .into_iter()
        .filter(|u| !(avoid_attack_speed && u.category() == UpgradeCategory::AttackSpeed))
        .collect();
    if let Some(boost) = stat_pool.choose(rng) {
        selected.push(*boost);
    }

    let mut remaining: Vec<Upgrade> = STAT_BOOSTS
        .into_iter()
        .chain(unlocks)
        .chain(weapon_upgrades)
        .filter(|u| !selected.contains(u))
        .collect();
    while selected.len() < UPGRADE_OFFER_COUNT && !remaining.is_empty() {
        let index = rng.gen_range(0..remaining.len());
        selected.push(remaining.remove(index));
    }
    selected
}

/// Consume the threshold, draw offers and raise the level-up sound.
pub fn begin_level_up<R: Rng + ?Sized>(
    player: &mut Player,
    session: &mut SessionState,
    rng: &mut R,
    sound_events: &mut Vec<SoundEvent>,
) -> bool {
    if !player.level_up() {
        return false;
    }
    let offers = generate_offers(player, &session.last_offer_categories, rng);
    session.last_offer_categories = offers.iter().map(|u| u.category()).collect();
    session.pending_offers = offers;
    sound_events.push(SoundEvent::LevelUp);
    info!(level = player.level, xp_to_next = player.xp_to_next, "level up");
    true
}

/// Apply one chosen upgrade. The magnet boost also reaches live pickups.
pub fn apply_upgrade(
    world: &mut World,
    player: &mut Player,
    session: &mut SessionState,
    upgrade: Upgrade,
) {
    upgrade.apply_to_player(player);
    if upgrade == Upgrade::MagnetBoost {
        for (_entity, pickup) in world.query_mut::<&mut Pickup>() {
            pickup.magnet_radius *= MAGNET_BOOST;
            pickup.homing_speed *= MAGNET_BOOST;
        }
        session.pickup_boost *= MAGNET_BOOST;
    }
    info!(upgrade = %upgrade.title(), "upgrade applied");
}

/// If the live boss is down, award one level of xp as a pickup and advance
/// the boss schedule. The final boss sets the completion flag instead.
pub fn resolve_boss_defeat(
    world: &mut World,
    session: &mut SessionState,
    player: &Player,
    sound_events: &mut Vec<SoundEvent>,
) -> bool {
    let Some(entity) = session.boss else {
        return false;
    };
    let (position, kind) = {
        let Ok(health) = world.get::<&Health>(entity) else {
            return false;
        };
        if health.hp > 0.0 {
            return false;
        }
        let Ok(position) = world.get::<&Position>(entity).map(|p| *p) else {
            return false;
        };
        let Ok(kind) = world.get::<&Boss>(entity).map(|b| b.kind) else {
            return false;
        };
        (position, kind)
    };

    let _ = world.despawn(entity);
    session.boss = None;
    session.bosses_defeated += 1;
    world_setup::spawn_pickup(world, session, position, player.xp_to_next);
    sound_events.push(SoundEvent::BossDefeated);
    info!(boss = kind.display_name(), "boss defeated");

    if session.next_boss_level >= FINAL_BOSS_LEVEL {
        session.game_complete = true;
        return true;
    }
    session.next_boss_level += BOSS_LEVEL_STEP;
    session.boss_spawned = false;
    true
}
