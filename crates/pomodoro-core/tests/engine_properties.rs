//! Property tests for the pure timer engine.

use pomodoro_core::timer::{
    add_task, duration_for, format_time, progress_ratio, switch_mode, tick, Mode, TimerState,
};
use proptest::prelude::*;

fn any_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Focus),
        Just(Mode::ShortBreak),
        Just(Mode::LongBreak),
    ]
}

fn any_state() -> impl Strategy<Value = TimerState> {
    (any_mode(), 0u32..1000, any::<bool>()).prop_flat_map(|(mode, done, running)| {
        (0..=duration_for(mode)).prop_map(move |remaining_seconds| TimerState {
            mode,
            remaining_seconds,
            completed_pomodoros: done,
            is_running: running,
            tasks: Vec::new(),
        })
    })
}

proptest! {
    #[test]
    fn tick_preserves_remaining_bounds(state in any_state()) {
        let out = tick(&state);
        let next = out.next_state;
        prop_assert!(next.remaining_seconds >= 1);
        prop_assert!(next.remaining_seconds <= duration_for(next.mode));
    }

    #[test]
    fn only_focus_completions_count(state in any_state()) {
        let out = tick(&state);
        let expected = if out.completed_cycle && state.mode == Mode::Focus {
            state.completed_pomodoros + 1
        } else {
            state.completed_pomodoros
        };
        prop_assert_eq!(out.next_state.completed_pomodoros, expected);
    }

    #[test]
    fn progress_is_a_ratio(state in any_state()) {
        let p = progress_ratio(&state);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn progress_never_decreases_within_a_session(mode in any_mode(), steps in 1usize..400) {
        let mut state = switch_mode(&TimerState::default(), mode);
        prop_assert_eq!(progress_ratio(&state), 0.0);
        let mut last = 0.0;
        for _ in 0..steps {
            let out = tick(&state);
            if out.completed_cycle {
                break;
            }
            let p = progress_ratio(&out.next_state);
            prop_assert!(p >= last);
            last = p;
            state = out.next_state;
        }
    }

    #[test]
    fn format_time_round_trips_seconds(secs in 0u32..1_000_000) {
        let text = format_time(secs);
        let (min, sec) = text.split_once(':').unwrap();
        prop_assert!(min.len() >= 2);
        prop_assert_eq!(sec.len(), 2);
        let min: u32 = min.parse().unwrap();
        let sec: u32 = sec.parse().unwrap();
        prop_assert!(sec < 60);
        prop_assert_eq!(min * 60 + sec, secs);
    }

    #[test]
    fn whitespace_tasks_are_ignored(ws in "[ \t\n]{0,8}") {
        let state = TimerState::default();
        prop_assert_eq!(add_task(&state, &ws), state);
    }
}
