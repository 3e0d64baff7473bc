#[cfg(test)]
mod tests {
    use bugstorm_core::enums::{BossKind, BugKind};
    use bugstorm_core::types::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::boss_fsm::{evaluate, final_boss_phase, plan_special_attack, BossContext};
    use crate::difficulty::*;
    use crate::profiles::{boss_stats, bug_stats};
    use crate::pursuit::{step_toward, step_toward_until};
    use crate::spawn_weights::*;

    fn ctx(kind: BossKind, hp_fraction: f64) -> BossContext {
        BossContext {
            kind,
            position: Position::new(100.0, 100.0),
            player_position: Position::new(200.0, 100.0),
            hp_fraction,
            speed: 0.6,
            move_counter: 1,
            wander_target: None,
            world_width: 1200.0,
            world_height: 800.0,
        }
    }

    #[test]
    fn test_step_toward_zero_distance() {
        let p = Position::new(10.0, 10.0);
        assert_eq!(step_toward(p, p, 5.0), p);
    }

    #[test]
    fn test_step_toward_unit_speed() {
        let next = step_toward(Position::new(0.0, 0.0), Position::new(3.0, 4.0), 2.0);
        assert!((next.x - 1.2).abs() < 1e-9);
        assert!((next.y - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_step_toward_until_stops_near_target() {
        let p = Position::new(0.0, 0.0);
        let near = Position::new(4.0, 0.0);
        assert_eq!(step_toward_until(p, near, 1.0, 5.0), p);
    }

    #[test]
    fn test_bug_stats_scaling() {
        let s = bug_stats(BugKind::SyntaxError, 1);
        assert_eq!(s.hp, 50.0);
        assert_eq!(s.contact_damage, 12.0);
        assert_eq!(s.xp_value, 11);

        let s = bug_stats(BugKind::MemoryLeak, 3);
        assert_eq!(s.hp, (75.0_f64 * 1.8).floor());
        assert_eq!(s.contact_damage, (20.0_f64 * 1.3).floor());
        assert_eq!(s.xp_value, (25.0_f64 * 1.3).floor() as u32);
    }

    #[test]
    fn test_bug_stats_zero_difficulty() {
        let s = bug_stats(BugKind::SyntaxError, 0);
        assert_eq!(s.hp, 30.0);
        assert_eq!(s.xp_value, 10);
    }

    #[test]
    fn test_boss_stats_scaling() {
        let s = boss_stats(BossKind::SyntaxBoss, 1);
        assert_eq!(s.hp, 300.0);
        assert_eq!(s.contact_damage, 20.0);
        let s = boss_stats(BossKind::GitBoss, 3);
        assert_eq!(s.hp, 2400.0);
        assert_eq!(s.contact_damage, 64.0);
    }

    #[test]
    fn test_final_boss_phases() {
        assert_eq!(final_boss_phase(1.0), 1);
        assert_eq!(final_boss_phase(0.67), 1);
        assert_eq!(final_boss_phase(0.66), 2);
        assert_eq!(final_boss_phase(0.34), 2);
        assert_eq!(final_boss_phase(0.33), 3);
        assert_eq!(final_boss_phase(0.0), 3);
    }

    #[test]
    fn test_regular_boss_pursues() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = ctx(BossKind::LogicBoss, 0.5);
        c.speed = 0.7;
        let out = evaluate(&c, &mut rng);
        assert!((out.position.x - 100.7).abs() < 1e-9);
        assert_eq!(out.phase, None);
    }

    #[test]
    fn test_final_boss_speed_by_phase() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let slow = evaluate(&ctx(BossKind::GitBoss, 0.9), &mut rng);
        assert_eq!(slow.phase, Some(1));
        assert!((slow.position.x - 100.3).abs() < 1e-9);

        let charge = evaluate(&ctx(BossKind::GitBoss, 0.1), &mut rng);
        assert_eq!(charge.phase, Some(3));
        assert!((charge.position.x - 101.8).abs() < 1e-9);
    }

    #[test]
    fn test_final_boss_wander_retargets() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let first = evaluate(&ctx(BossKind::GitBoss, 0.5), &mut rng);
        assert_eq!(first.phase, Some(2));
        let target = first.wander_target.unwrap();
        assert!(target.x >= 0.0 && target.x <= 1200.0);
        assert!(target.y >= 0.0 && target.y <= 800.0);

        // Keeps its target between retarget ticks.
        let mut c = ctx(BossKind::GitBoss, 0.5);
        c.wander_target = Some(target);
        c.move_counter = 2;
        assert_eq!(evaluate(&c, &mut rng).wander_target, Some(target));

        // Picks a new one on the interval.
        c.move_counter = 60;
        assert_ne!(evaluate(&c, &mut rng).wander_target, Some(target));
    }

    #[test]
    fn test_special_attack_formations() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let origin = Position::new(600.0, 100.0);

        let syntax = plan_special_attack(BossKind::SyntaxBoss, None, origin, 5, &mut rng);
        assert_eq!(syntax.len(), 2);
        assert!(syntax.iter().all(|r| r.kind == BugKind::SyntaxError && r.difficulty == 2));
        assert!((syntax[0].position.x - 660.0).abs() < 1e-9);
        assert!((syntax[1].position.x - 540.0).abs() < 1e-9);

        let network = plan_special_attack(BossKind::NetworkBoss, None, origin, 5, &mut rng);
        assert_eq!(network.len(), 4);
        assert!(network.iter().all(|r| (r.position.distance_to(&origin) - 100.0).abs() < 1e-9));

        let memory = plan_special_attack(BossKind::MemoryBoss, None, origin, 5, &mut rng);
        assert_eq!(memory.len(), 1);
        assert!((memory[0].position.x - origin.x).abs() <= 50.0);

        let security = plan_special_attack(BossKind::SecurityBoss, None, origin, 5, &mut rng);
        assert_eq!(security.len(), 2);
        assert!(security
            .iter()
            .all(|r| matches!(r.kind, BugKind::MemoryLeak | BugKind::LogicBug)));

        let git2 = plan_special_attack(BossKind::GitBoss, Some(2), origin, 5, &mut rng);
        let kinds: Vec<_> = git2.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![BugKind::SyntaxError, BugKind::LogicBug, BugKind::NullPointer]);

        let git3 = plan_special_attack(BossKind::GitBoss, Some(3), origin, 5, &mut rng);
        assert_eq!(git3.len(), 4);
        assert!(git3.iter().all(|r| r.kind == BugKind::MemoryLeak && r.difficulty == 5));
    }

    #[test]
    fn test_weighted_selection_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..draws {
            let kind = choose_bug_kind(&mut rng, 0.0);
            let idx = BugKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[idx] += 1;
        }
        let weights = [2.0, 1.0, 1.0, 0.5];
        let total: f64 = weights.iter().sum();
        for (count, weight) in counts.iter().zip(weights) {
            let observed = *count as f64 / draws as f64;
            let expected = weight / total;
            assert!(
                (observed - expected).abs() < 0.01,
                "observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_weighted_selection_fallback() {
        let items = [(BugKind::LogicBug, 1.0), (BugKind::MemoryLeak, 1.0)];
        assert_eq!(select_weighted(&items, 0.0, BugKind::SyntaxError), BugKind::LogicBug);
        assert_eq!(select_weighted(&items, 1.0, BugKind::SyntaxError), BugKind::MemoryLeak);
        // A draw past the total leaves the walk without a selection.
        assert_eq!(select_weighted(&items, 1.5, BugKind::SyntaxError), BugKind::SyntaxError);
    }

    #[test]
    fn test_skill_bias() {
        assert_eq!(bug_weights(0.5), [2.0, 1.0, 1.0, 0.5]);
        assert_eq!(bug_weights(2.0), [1.0; 4]);
        assert_eq!(bug_weights(4.0), [1.0, 1.5, 1.0, 2.0]);
        assert_eq!(player_skill(5, 0.0), 5.0);
        assert_eq!(player_skill(20, 40.0), 5.0);
    }

    #[test]
    fn test_difficulty_curve() {
        assert_eq!(level_for_elapsed(0.0), 1);
        assert_eq!(level_for_elapsed(29.9), 1);
        assert_eq!(level_for_elapsed(30.0), 2);
        assert_eq!(population_cap(1.0), 55.0);
        assert_eq!(population_cap(40.0), 100.0);
        assert_eq!(spawn_interval(1.0, 1), 52.0);
        assert_eq!(spawn_interval(20.0, 20), 20.0);
        assert_eq!(kills_per_second(10, 0.0), 0.0);
    }

    #[test]
    fn test_scalar_stays_bounded() {
        let mut s = 1.0;
        for _ in 0..10_000 {
            s = adjust_scalar(s, 1.0, 100.0);
            assert!(s <= 2.0);
        }
        assert_eq!(s, 2.0);
        for _ in 0..10_000 {
            s = adjust_scalar(s, 0.0, 0.0);
            assert!(s >= 0.5);
        }
        assert_eq!(s, 0.5);
        assert_eq!(adjust_scalar(1.0, 0.5, 1.0), 1.0);
    }
}
