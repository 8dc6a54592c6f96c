//! Property-based tests for window arithmetic and navigation invariants.
//!
//! Tests validate:
//! 1. Window operations never produce `start > end`
//! 2. compress and shift_into land inside their bounds
//! 3. Navigation keeps the view inside the rendered rows and the cursor on it
//! 4. goto_line lands on the clamped target

use hexview::config::ViewerConfig;
use hexview::model::Window;
use hexview::state::HexSession;
use proptest::prelude::*;
use std::io::Cursor;

fn window() -> impl Strategy<Value = Window> {
    (-1000i64..1000, 0i64..500).prop_map(|(start, len)| Window::sized(start, len))
}

// ===== Property 1-2: Window algebra =====

proptest! {
    #[test]
    fn compress_result_is_inside_bounds(bounds in window(), other in window()) {
        let result = bounds.compress(other);
        prop_assert!(result.start() <= result.end());
        prop_assert!(bounds.contains(&result));
    }

    #[test]
    fn compress_of_contained_window_is_identity(bounds in window(), a in 0i64..500, b in 0i64..500) {
        let (lo, hi) = (a.min(b), a.max(b));
        let inner = Window::new(
            bounds.start() + lo.min(bounds.len()),
            bounds.start() + hi.min(bounds.len()),
        ).unwrap();
        prop_assert_eq!(bounds.compress(inner), inner);
    }

    #[test]
    fn shift_into_preserves_width_when_it_fits(bounds in window(), other in window()) {
        let result = bounds.shift_into(other);
        prop_assert!(bounds.contains(&result));
        if other.len() <= bounds.len() {
            prop_assert_eq!(result.len(), other.len());
        } else {
            prop_assert_eq!(result, bounds);
        }
    }

    #[test]
    fn translate_then_back_is_identity(w in window(), offset in -1000i64..1000) {
        prop_assert_eq!(w.translate(offset).translate(-offset), w);
    }

    #[test]
    fn scale_multiplies_length(w in window(), factor in 0i64..64) {
        prop_assert_eq!(w.scale(factor).len(), w.len() * factor);
    }
}

// ===== Property 3-4: Navigation =====

fn session(len: usize, bytes_per_line: usize, height: usize) -> HexSession<Cursor<Vec<u8>>> {
    let config = ViewerConfig {
        bytes_per_line,
        viewport_height: height,
        ..ViewerConfig::default()
    };
    let data: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
    HexSession::from_reader("prop.bin", Cursor::new(data), &config).unwrap()
}

#[derive(Debug, Clone)]
enum Step {
    Scroll(i64),
    Goto(i64),
    Plugin(i64),
    Resize(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (-40i64..40).prop_map(Step::Scroll),
        2 => (-50i64..2000).prop_map(Step::Goto),
        1 => (-1i64..=3).prop_map(Step::Plugin),
        1 => (1usize..30).prop_map(Step::Resize),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn navigation_keeps_view_and_cursor_consistent(
        len in 1usize..4000,
        bytes_per_line in 1usize..17,
        height in 1usize..25,
        steps in prop::collection::vec(step(), 1..30),
    ) {
        let mut session = session(len, bytes_per_line, height);
        let line_count = len.div_ceil(bytes_per_line) as u64;

        for step in steps {
            match step {
                Step::Scroll(n) => session.scroll(n).unwrap(),
                Step::Goto(n) => session.goto_line(n).unwrap(),
                Step::Plugin(sel) => session.activate_plugin(sel).unwrap(),
                Step::Resize(h) => session.resize(h).unwrap(),
            }

            let view = session.view_window();
            let screen = Window::sized(0, session.buffers().screen_end() as i64);
            prop_assert!(screen.contains(&view), "view {} outside {}", view, screen);
            prop_assert!(view.len() as usize <= session.height());

            let current = session.current_line().unwrap();
            let top = session.top_line().unwrap();
            prop_assert!(current < line_count);
            prop_assert!(top <= current);
            prop_assert!(session.file_window().contains_point(current as i64));
            prop_assert!((session.cursor_offset() as i64) < view.len().max(1));
        }
    }

    #[test]
    fn goto_lands_on_clamped_line(
        len in 1usize..4000,
        bytes_per_line in 1usize..17,
        target in -100i64..5000,
    ) {
        let mut session = session(len, bytes_per_line, 10);
        let last = len.div_ceil(bytes_per_line) as i64 - 1;

        session.goto_line(target).unwrap();

        prop_assert_eq!(session.current_line(), Some(target.clamp(0, last) as u64));
    }
}
