//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. Entity lists come out in spawn order.

use hecs::World;

use bugstorm_core::components::*;
use bugstorm_core::enums::GamePhase;
use bugstorm_core::events::SoundEvent;
use bugstorm_core::player::Player;
use bugstorm_core::state::*;
use bugstorm_core::types::{Position, SimTime};

use crate::session::SessionState;

/// Engine-owned state the snapshot reads besides the world.
pub struct SnapshotContext<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub sound_enabled: bool,
    pub sound_toggled: bool,
    pub player: &'a Player,
    pub session: &'a SessionState,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: &SnapshotContext<'_>,
    sound_events: Vec<SoundEvent>,
) -> GameStateSnapshot {
    let session = ctx.session;
    GameStateSnapshot {
        time: *ctx.time,
        phase: ctx.phase,
        sound_enabled: ctx.sound_enabled,
        sound_toggled: ctx.sound_toggled,
        player: build_player(ctx.player),
        bugs: build_bugs(world),
        boss: build_boss(world),
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        upgrade_offers: session
            .pending_offers
            .iter()
            .map(|u| UpgradeOfferView {
                title: u.title(),
                description: u.description(ctx.player),
            })
            .collect(),
        difficulty: DifficultyView {
            level: session.difficulty_level,
            ai_adjustment: session.ai_adjustment,
            effective: session.effective_difficulty(),
            population_cap: session.population_cap,
            spawn_interval: session.spawn_interval,
            bosses_defeated: session.bosses_defeated,
        },
        next_boss_level: (!session.game_complete).then_some(session.next_boss_level),
        game_complete: session.game_complete,
        sound_events,
    }
}

fn build_player(player: &Player) -> PlayerView {
    PlayerView {
        position: player.position,
        radius: player.radius,
        hp: player.hp,
        max_hp: player.max_hp,
        level: player.level,
        xp: player.xp,
        xp_to_next: player.xp_to_next,
        kills: player.kills,
        damage_reduction: player.damage_reduction,
        attack_range: player.attack_range,
        weapons: player
            .weapons
            .iter()
            .map(|w| WeaponView {
                kind: w.kind,
                name: w.name().to_string(),
                level: w.level,
                damage: w.damage,
                archetype: w.archetype(),
            })
            .collect(),
    }
}

fn build_bugs(world: &World) -> Vec<BugView> {
    let mut bugs: Vec<(SpawnOrder, BugView)> = world
        .query::<(&Bug, &Position, &Radius, &Health, &SpawnOrder)>()
        .iter()
        .map(|(_, (bug, pos, r, health, order))| {
            (
                *order,
                BugView {
                    kind: bug.kind,
                    position: *pos,
                    radius: r.0,
                    hp: health.hp,
                    max_hp: health.max_hp,
                },
            )
        })
        .collect();
    bugs.sort_by_key(|(order, _)| *order);
    bugs.into_iter().map(|(_, view)| view).collect()
}

fn build_boss(world: &World) -> Option<BossView> {
    world
        .query::<(&Boss, &Position, &Radius, &Health)>()
        .iter()
        .next()
        .map(|(_, (boss, pos, r, health))| BossView {
            kind: boss.kind,
            name: boss.kind.display_name().to_string(),
            position: *pos,
            radius: r.0,
            hp: health.hp,
            max_hp: health.max_hp,
            phase: boss.phase,
        })
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(SpawnOrder, ProjectileView)> = world
        .query::<(&Projectile, &Position, &Radius, &SpawnOrder)>()
        .iter()
        .map(|(_, (p, pos, r, order))| {
            (
                *order,
                ProjectileView {
                    position: *pos,
                    radius: r.0,
                    angle: p.angle,
                    archetype: p.archetype,
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(order, _)| *order);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<(SpawnOrder, PickupView)> = world
        .query::<(&Pickup, &Position, &Radius, &SpawnOrder)>()
        .iter()
        .map(|(_, (pickup, pos, r, order))| {
            (
                *order,
                PickupView {
                    position: *pos,
                    radius: r.0,
                    xp_value: pickup.xp_value,
                },
            )
        })
        .collect();
    pickups.sort_by_key(|(order, _)| *order);
    pickups.into_iter().map(|(_, view)| view).collect()
}
