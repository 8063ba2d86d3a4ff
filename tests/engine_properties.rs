//! Property tests for the simulation invariants over arbitrary input streams

use pong_engine::consts::*;
use pong_engine::sim::{GameEvent, MatchPhase, MatchState, Side, TickInput, advance, seeded_rng};
use pong_engine::Tuning;
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left_up, left_down, right_up, right_down)| TickInput {
            left_up,
            left_down,
            right_up,
            right_down,
            ..Default::default()
        },
    )
}

/// Input stream that starts the match, then holds keys for random runs
fn arb_session() -> impl Strategy<Value = Vec<TickInput>> {
    prop::collection::vec((arb_input(), 1usize..120), 1..40).prop_map(|runs| {
        let mut inputs = vec![TickInput {
            start_pressed: true,
            ..Default::default()
        }];
        for (input, len) in runs {
            inputs.extend(std::iter::repeat_n(input, len));
        }
        inputs
    })
}

fn arb_tuning() -> impl Strategy<Value = Tuning> {
    (MIN_INITIAL_BALL_SPEED..=MAX_INITIAL_BALL_SPEED, 1u32..20).prop_map(|(speed, delay)| Tuning {
        initial_ball_speed: speed,
        reset_delay_ticks: delay,
        ..Default::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn paddles_stay_in_arena(inputs in arb_session(), seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = seeded_rng(seed);
        let mut state = MatchState::new();
        for input in &inputs {
            state = advance(&state, input, &tuning, &mut rng).state;
            for paddle in [&state.left, &state.right] {
                prop_assert!(paddle.y >= 0.0 && paddle.y <= ARENA_H - PADDLE_H);
            }
        }
        // Fixed X never changes
        prop_assert_eq!(state.left.x, PADDLE_INSET);
        prop_assert_eq!(state.right.x, ARENA_W - PADDLE_INSET - PADDLE_W);
    }

    #[test]
    fn each_score_event_adds_exactly_one_point(
        inputs in arb_session(),
        seed in any::<u64>(),
        tuning in arb_tuning()
    ) {
        let mut rng = seeded_rng(seed);
        let mut state = MatchState::new();
        for input in &inputs {
            let before = state.scores();
            let step = advance(&state, input, &tuning, &mut rng);
            let after = step.state.scores();

            let scored: Vec<_> = step
                .events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::Score { side, new_score } => Some((*side, *new_score)),
                    _ => None,
                })
                .collect();
            prop_assert!(scored.len() <= 1);

            match scored.first() {
                Some((Side::Left, n)) => {
                    prop_assert_eq!(after, (before.0 + 1, before.1));
                    prop_assert_eq!(*n, after.0);
                    prop_assert_eq!(step.state.ball.vel, glam::Vec2::ZERO);
                }
                Some((Side::Right, n)) => {
                    prop_assert_eq!(after, (before.0, before.1 + 1));
                    prop_assert_eq!(*n, after.1);
                    prop_assert_eq!(step.state.ball.vel, glam::Vec2::ZERO);
                }
                None => prop_assert_eq!(after, before),
            }
            state = step.state;
        }
    }

    #[test]
    fn game_over_iff_winning_score(inputs in arb_session(), seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = seeded_rng(seed);
        let mut state = MatchState::new();
        for input in &inputs {
            state = advance(&state, input, &tuning, &mut rng).state;
            let (left, right) = state.scores();
            prop_assert!(left <= WINNING_SCORE && right <= WINNING_SCORE);
            match state.phase {
                MatchPhase::GameOver { winner } => {
                    prop_assert_eq!(state.paddle(winner).score, WINNING_SCORE);
                    prop_assert!(state.paddle(winner.opponent()).score < WINNING_SCORE);
                }
                _ => prop_assert!(left < WINNING_SCORE && right < WINNING_SCORE),
            }
        }
    }

    #[test]
    fn ball_speed_never_exceeds_cap(inputs in arb_session(), seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = seeded_rng(seed);
        let mut state = MatchState::new();
        for input in &inputs {
            state = advance(&state, input, &tuning, &mut rng).state;
            prop_assert!(state.ball.vel.length() <= tuning.max_ball_speed + 1e-3);
        }
    }

    #[test]
    fn wall_bounce_clamps_and_flips(speed in 0.5f32..15.0, x in 100.0f32..650.0) {
        let mut state = MatchState::new();
        state.phase = MatchPhase::Playing;
        state.ball.pos = glam::Vec2::new(x, speed * 0.5);
        state.ball.vel = glam::Vec2::new(0.0, -speed);

        let step = advance(&state, &TickInput::default(), &Tuning::default(), &mut seeded_rng(1));
        prop_assert_eq!(step.state.ball.pos.y, 0.0);
        prop_assert_eq!(step.state.ball.vel.y, speed);
        prop_assert!(step.events.contains(&GameEvent::WallHit));
    }
}

#[test]
fn full_match_reaches_game_over_with_idle_paddles() {
    // Paddles parked at the top leave the lower field open
    let tuning = Tuning::default();
    let mut rng = seeded_rng(5);
    let mut state = MatchState::new();
    state = advance(
        &state,
        &TickInput {
            start_pressed: true,
            ..Default::default()
        },
        &tuning,
        &mut rng,
    )
    .state;

    let hold_up = TickInput {
        left_up: true,
        right_up: true,
        ..Default::default()
    };
    let mut game_overs = 0;
    for _ in 0..200_000 {
        let step = advance(&state, &hold_up, &tuning, &mut rng);
        game_overs += step
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        state = step.state;
        if state.winner().is_some() {
            break;
        }
    }

    assert_eq!(game_overs, 1);
    let winner = state.winner().expect("match should finish");
    assert_eq!(state.paddle(winner).score, WINNING_SCORE);
}
