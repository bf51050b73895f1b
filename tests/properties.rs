use glam::{IVec2, Vec2};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use wave_survivor::Tuning;
use wave_survivor::consts::*;
use wave_survivor::sim::{Enemy, GameState, MenuAction, Player, TickInput, Upgrade};

const DT: f32 = 1.0 / 60.0;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (-1i32..=1, -1i32..=1, any::<bool>(), -2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(
        |(mx, my, fire, ax, ay)| TickInput {
            movement: IVec2::new(mx, my),
            fire,
            aim: Vec2::new(ax, ay),
            ..Default::default()
        },
    )
}

proptest! {
    #[test]
    fn spawned_enemies_start_outside_spawn_distance(
        seed in any::<u64>(),
        px in -10_000.0f32..10_000.0,
        py in -10_000.0f32..10_000.0,
        wave in 1u32..40,
    ) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Vec2::new(px, py);
        let hm = 1.0 + wave as f32 * 0.1;
        let sm = 1.0 + wave as f32 * 0.05;
        for id in 0..20 {
            let e = Enemy::spawn(id, &mut rng, player, hm, sm, &tuning);
            prop_assert!(e.pos.distance(player) >= SPAWN_DISTANCE - 0.01);
            prop_assert!(e.pos.distance(player) < SPAWN_DISTANCE + SPAWN_SPREAD + 0.01);
            prop_assert!(e.health <= e.max_health);
        }
    }

    #[test]
    fn health_never_exceeds_max(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..200)) {
        let mut state = GameState::new(seed);
        state.player.vampirism = 5.0;
        let start = TickInput { action: Some(MenuAction::Start), ..Default::default() };
        state.update(&start, DT);
        state.player.vampirism = 5.0;

        for input in &inputs {
            state.update(input, DT);
            prop_assert!(state.player.health <= state.player.max_health);
            for e in &state.enemies {
                prop_assert!(e.health <= e.max_health);
            }
        }
    }

    #[test]
    fn invulnerable_player_ignores_damage(amount in 0.0f32..1000.0, hits in 1usize..10) {
        let mut player = Player::new(&Tuning::default());
        prop_assert!(player.take_damage(1.0));
        let health = player.health;
        for _ in 0..hits {
            prop_assert!(!player.take_damage(amount));
            prop_assert_eq!(player.health, health);
        }
    }

    #[test]
    fn damage_upgrade_is_additive(n in 0u32..20) {
        let mut player = Player::new(&Tuning::default());
        for _ in 0..n {
            player.apply_upgrade(Upgrade::Damage);
        }
        prop_assert_eq!(player.damage_multiplier, 1.0 + 0.5 * n as f32);
    }

    #[test]
    fn health_upgrade_raises_max_and_heals(n in 1u32..10, missing in 0.0f32..100.0) {
        let mut player = Player::new(&Tuning::default());
        player.health -= missing;
        for _ in 0..n {
            player.apply_upgrade(Upgrade::Health);
        }
        prop_assert_eq!(player.max_health, PLAYER_HEALTH + 20.0 * n as f32);
        prop_assert!(player.health <= player.max_health);
    }
}
