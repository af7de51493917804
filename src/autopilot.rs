//! Demo mode: synthetic input that plays the game
//!
//! Picks seeds up when nothing is close, kites away from the nearest enemy
//! otherwise, and clicks through menus and the shop.

use glam::Vec2;

use crate::economy::UpgradeKind;
use crate::game::Game;
use crate::input::{Action, InputState};
use crate::scene::SceneId;
use crate::sim::WaveState;

/// Enemies closer than this are run from
const DANGER_RADIUS: f32 = 220.0;
/// How far ahead of the player the flee target is placed
const FLEE_DISTANCE: f32 = 160.0;
/// Keep the steering target this far inside the field
const EDGE_INSET: f32 = 60.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Waves cleared so far this run
    pub waves_cleared: u32,
    /// Waves lost so far this run
    pub waves_lost: u32,
    last_scene: Option<SceneId>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next frame given the current game
    pub fn input(&mut self, game: &Game) -> InputState {
        let scene = game.current_scene();
        if self.last_scene != Some(scene) {
            match scene {
                SceneId::Victory => self.waves_cleared += 1,
                SceneId::GameOver => self.waves_lost += 1,
                _ => {}
            }
            self.last_scene = Some(scene);
        }

        match scene {
            SceneId::Menu | SceneId::Victory | SceneId::GameOver => {
                InputState::default().with_action(Action::Confirm)
            }
            SceneId::WaveSelect | SceneId::Settings => {
                InputState::default().with_action(Action::Cancel)
            }
            SceneId::Shop => Self::shop_input(game),
            SceneId::Wave(_) => match game.manager.scenes.wave.state() {
                Some(state) => InputState::new(steer(state)),
                None => InputState::default(),
            },
        }
    }

    /// Click the cheapest affordable upgrade, or continue
    fn shop_input(game: &Game) -> InputState {
        let economy = &game.ctx.economy;
        let cheapest = UpgradeKind::ALL
            .into_iter()
            .filter(|kind| economy.can_afford(*kind, economy.seeds))
            .min_by_key(|kind| economy.next_cost(*kind));

        let rows = &game.manager.scenes.shop.panel.rows;
        match cheapest.and_then(|kind| rows.iter().find(|(k, _)| *k == kind)) {
            Some((_, rect)) => InputState::default().with_click(rect.center()),
            None => InputState::default().with_action(Action::Continue),
        }
    }
}

/// Pointer target for the player this frame
pub fn steer(state: &WaveState) -> Vec2 {
    let player = state.player.body.pos;

    let nearest_enemy = state
        .enemies
        .iter()
        .filter(|e| e.body.alive)
        .min_by(|a, b| {
            a.body
                .pos
                .distance_squared(player)
                .partial_cmp(&b.body.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target = match nearest_enemy {
        Some(enemy) if enemy.body.pos.distance(player) < DANGER_RADIUS => {
            let away = (player - enemy.body.pos).normalize_or_zero();
            // Standing on the enemy: any direction will do
            let away = if away == Vec2::ZERO { Vec2::Y } else { away };
            player + away * FLEE_DISTANCE
        }
        _ => state
            .seeds
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .partial_cmp(&b.pos.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|seed| seed.pos)
            .unwrap_or_else(|| state.field.center()),
    };

    let min = state.field.min + Vec2::splat(EDGE_INSET);
    let max = state.field.max() - Vec2::splat(EDGE_INSET);
    target.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::Economy;
    use crate::settings::Settings;
    use crate::sim::{Enemy, EnemyKind, Rect, Seed, WaveConfig};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn wave() -> WaveState {
        WaveState::new(
            1,
            &Economy::new(),
            &Tuning::default(),
            Rect::new(0.0, 0.0, 1280.0, 720.0),
            3,
        )
    }

    fn enemy_at(state: &WaveState, pos: Vec2) -> Enemy {
        let mut rng = Pcg32::seed_from_u64(1);
        Enemy::new(
            pos,
            EnemyKind::Trash,
            &WaveConfig::for_level(1),
            &state.tuning,
            &mut rng,
        )
    }

    #[test]
    fn test_idle_field_returns_to_center() {
        let state = wave();
        assert_eq!(steer(&state), state.field.center());
    }

    #[test]
    fn test_goes_for_nearest_seed() {
        let mut state = wave();
        state.seeds.push(Seed::new(Vec2::new(900.0, 500.0)));
        state.seeds.push(Seed::new(Vec2::new(700.0, 400.0)));
        assert_eq!(steer(&state), Vec2::new(700.0, 400.0));
    }

    #[test]
    fn test_flees_close_enemy() {
        let mut state = wave();
        let player = state.player.body.pos;
        let enemy = enemy_at(&state, player + Vec2::new(100.0, 0.0));
        state.enemies.push(enemy);
        state.seeds.push(Seed::new(player + Vec2::new(300.0, 0.0)));

        let target = steer(&state);
        assert!(target.x < player.x);
    }

    #[test]
    fn test_target_stays_inside_field() {
        let mut state = wave();
        state.player.body.pos = Vec2::new(20.0, 20.0);
        let enemy = enemy_at(&state, Vec2::new(80.0, 80.0));
        state.enemies.push(enemy);

        let target = steer(&state);
        assert!(target.x >= EDGE_INSET && target.y >= EDGE_INSET);
    }

    #[test]
    fn test_drives_menu_into_a_wave() {
        let mut game = Game::new(Settings::default(), Tuning::default(), 11);
        let mut pilot = Autopilot::new();
        for _ in 0..40 {
            let input = pilot.input(&game);
            game.step(&input, 1.0 / 30.0);
        }
        assert_eq!(game.current_scene(), SceneId::Wave(1));
    }

    #[test]
    fn test_shop_buys_cheapest_then_continues() {
        let mut game = Game::new(Settings::default(), Tuning::default(), 11);
        game.ctx.economy.seeds = 5;
        game.ctx.economy.health_level = 1;

        let input = Autopilot::shop_input(&game);
        assert!(input.clicked);
        let speed_row = game.manager.scenes.shop.panel.rows[1].1;
        assert_eq!(input.pointer, speed_row.center());

        game.ctx.economy.seeds = 0;
        let input = Autopilot::shop_input(&game);
        assert!(input.just_pressed(Action::Continue));
    }
}
