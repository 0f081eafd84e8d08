#[cfg(test)]
mod tests {
    use crate::headless::{self, HeadlessCarousel};
    use crate::scroll::LoopScroll;
    use crate::*;
    use web_time::Duration;

    // 5 tiles of 200px with 10px margins: 220px per tile, 1100px per set,
    // 3300px of content in an 800px viewport. Tile i is centred at offset
    // 220 * i - 290, so the band [550, 1650] covers tiles 4..=8.
    fn five(config: CarouselConfig) -> HeadlessCarousel<char> {
        let mut h = HeadlessCarousel::uniform(
            vec!['a', 'b', 'c', 'd', 'e'],
            Some(2),
            config,
            200.0,
            10.0,
            800.0,
        );
        h.init();
        h.settle();
        h
    }

    fn centre_of(i: usize) -> f32 {
        220.0 * i as f32 - 290.0
    }

    fn assert_in_band(h: &HeadlessCarousel<char>) {
        let off = h.offset();
        assert!((550.0..=1650.0).contains(&off), "offset {off} left [550, 1650]");
    }

    #[test]
    fn test_init_centers_marked_tile() {
        let h = five(CarouselConfig::default());
        assert_eq!(h.active(), Some(7));
        assert_eq!(h.centered(), Some(7));
        assert_eq!(h.offset(), centre_of(7));
        assert_eq!(h.carousel().set_width(), 1100.0);
        insta::assert_snapshot!(h.markers(), @".....|..A..|.....");
    }

    #[test]
    fn test_init_without_marker_uses_middle_original() {
        let mut h =
            HeadlessCarousel::uniform(vec![1, 2, 3, 4], None, CarouselConfig::default(), 200.0, 10.0, 800.0);
        h.init();
        h.settle();
        assert_eq!(h.active(), Some(6));
        assert_eq!(h.centered(), Some(6));
        insta::assert_snapshot!(h.markers(), @"....|..A.|....");
    }

    #[test]
    fn test_wheel_steps_one_tile_and_locks_until_settle() {
        let mut h = five(CarouselConfig::default());

        assert!(h.wheel(WheelInput::vertical(120.0)));
        assert_eq!(h.active(), Some(8));
        assert!(h.carousel().is_wheel_locked());

        h.advance(Duration::from_millis(50));
        // swallowed, but no second step
        assert!(h.wheel(WheelInput::vertical(120.0)));
        assert_eq!(h.active(), Some(8));

        h.settle();
        assert!(!h.carousel().is_wheel_locked());
        assert_eq!(h.offset(), centre_of(8));
        assert_eq!(h.centered(), Some(8));
        insta::assert_snapshot!(h.markers(), @".....|..*A.|.....");
    }

    #[test]
    fn test_wheel_past_band_wraps_to_same_tile() {
        let mut h = five(CarouselConfig::default());
        h.wheel(WheelInput::vertical(120.0));
        h.settle();
        // tile 9 is a clone of original 4; its offset 1690 is past the band
        h.wheel(WheelInput::horizontal(40.0));
        assert_eq!(h.active(), Some(9));
        h.settle();
        assert_eq!(h.offset(), centre_of(9) - 1100.0);
        assert_eq!(h.active(), Some(4));
        assert_eq!(h.carousel().sequence().get(4).map(|t| t.origin), Some(4));
    }

    #[test]
    fn test_held_arrow_keys_never_reach_the_strip_end() {
        let mut h = five(CarouselConfig::default());
        for _ in 0..600 {
            h.key(Key::ArrowRight);
            h.advance(Duration::from_millis(32));
            assert_in_band(&h);
        }
        for _ in 0..200 {
            h.key(Key::ArrowLeft);
            h.advance(Duration::from_millis(32));
            assert_in_band(&h);
        }
        h.settle();
        let active = h.active().unwrap();
        assert!((4..=8).contains(&active), "active {active}");
        assert_eq!(h.centered(), Some(active));
        assert_eq!(h.offset(), centre_of(active));
    }

    #[test]
    fn test_rapid_keys_wrap_mid_glide() {
        let mut h = five(CarouselConfig::default());
        for _ in 0..12 {
            h.key(Key::ArrowRight);
            h.advance(headless::FRAME);
            assert_in_band(&h);
        }
        h.settle();
        assert_in_band(&h);
        assert_eq!(h.centered(), h.active());
        assert_eq!(h.offset(), centre_of(h.active().unwrap()));
    }

    #[test]
    fn test_drag_across_band_edge_follows_pointer() {
        let mut h = five(CarouselConfig::default());
        h.pointer(PointerInput::down(500.0));
        for i in 1..=8 {
            h.pointer(PointerInput::moved(500.0 - 100.0 * i as f32));
            h.advance(headless::FRAME);
            assert_in_band(&h);
        }
        // 1250 + 800 folded back by one set
        assert_eq!(h.offset(), 950.0);

        h.pointer(PointerInput::up(-300.0));
        assert!(!h.click());
        h.settle();
        assert_eq!(h.active(), Some(6));
        assert_eq!(h.offset(), centre_of(6));
    }

    #[test]
    fn test_wheel_backwards_and_line_mode() {
        let mut h = five(CarouselConfig::default());
        let lines = WheelInput {
            delta_y: -3.0,
            mode: DeltaMode::Line,
            ..Default::default()
        };
        assert!(h.wheel(lines));
        h.settle();
        assert_eq!(h.active(), Some(6));
        assert_eq!(h.offset(), centre_of(6));
    }

    #[test]
    fn test_wheel_ignored_with_ctrl_or_without_overflow() {
        let mut h = five(CarouselConfig::default());
        let zoom = WheelInput {
            delta_y: 120.0,
            modifiers: Modifiers { ctrl: true },
            ..Default::default()
        };
        assert!(!h.wheel(zoom));
        assert!(!h.wheel(WheelInput::vertical(0.0)));
        assert_eq!(h.active(), Some(7));

        let mut wide =
            HeadlessCarousel::uniform(vec![()], None, CarouselConfig::default(), 100.0, 10.0, 1000.0);
        wide.init();
        assert!(!wide.wheel(WheelInput::vertical(120.0)));
    }

    #[test]
    fn test_short_press_is_a_click() {
        let mut h = five(CarouselConfig::default());
        h.drag(500.0, 3.0, 3);
        assert!(h.click());
        h.settle();
        assert_eq!(h.active(), Some(7));
        assert_eq!(h.offset(), centre_of(7));
    }

    #[test]
    fn test_drag_suppresses_click_and_recenters() {
        let mut h = five(CarouselConfig::default());
        h.drag(500.0, 20.0, 4);
        assert!(!h.click());
        h.settle();
        assert_eq!(h.active(), Some(7));
        assert_eq!(h.offset(), centre_of(7));

        // long drag to the left lands on the next tile
        h.drag(500.0, -300.0, 10);
        assert_eq!(h.active(), Some(8));
        h.settle();
        assert_eq!(h.offset(), centre_of(8));

        // a new press resets the click guard
        h.pointer(PointerInput::down(10.0));
        assert!(h.click());
    }

    #[test]
    fn test_drag_markers_and_capture() {
        let mut h = five(CarouselConfig::default());
        h.pointer(PointerInput::down(400.0));
        assert!(h.is_dragging());
        assert_eq!(h.captured(), Some(PointerId(1)));
        h.pointer(PointerInput::moved(350.0));
        assert_eq!(h.offset(), centre_of(7) + 50.0);
        h.pointer(PointerInput::cancel(350.0));
        assert!(!h.is_dragging());
        assert_eq!(h.captured(), None);

        // moves without a press do nothing
        let before = h.offset();
        h.pointer(PointerInput::moved(0.0));
        assert_eq!(h.offset(), before);
    }

    #[test]
    fn test_arrow_keys_step_and_center() {
        let mut h = five(CarouselConfig::default());
        assert!(h.key(Key::ArrowRight));
        assert_eq!(h.active(), Some(8));
        h.settle();
        assert_eq!(h.centered(), Some(8));

        h.key(Key::ArrowLeft);
        h.settle();
        h.key(Key::ArrowLeft);
        h.settle();
        assert_eq!(h.active(), Some(6));
        assert_eq!(h.offset(), centre_of(6));

        assert!(!h.key(Key::Other("Enter".into())));
    }

    #[test]
    fn test_reduced_motion_centers_instantly() {
        let mut h = five(CarouselConfig::default());
        h.set_reduced_motion(true);
        h.settle();
        h.wheel(WheelInput::vertical(120.0));
        assert_eq!(h.offset(), centre_of(8));
    }

    #[test]
    fn test_resize_reinitializes() {
        let mut h = five(CarouselConfig::default());
        h.key(Key::ArrowRight);
        h.settle();
        h.resize(Layout::strip(600.0, &[200.0; 15], 10.0));
        assert_eq!(h.active(), Some(7));
        assert_eq!(h.offset(), 220.0 * 7.0 + 110.0 - 300.0);
    }

    #[test]
    fn test_scale_mode_emphasis() {
        let mut h = five(CarouselConfig::default().mode(CarouselMode::Scale));
        let s = h.scales();
        assert!((s[7] - 1.16).abs() < 1e-5);
        assert!((s[8] - 1.0324).abs() < 1e-5);
        assert!((s[6] - 1.0324).abs() < 1e-5);
        assert_eq!(s[5], 1.0);
        assert_eq!(s[0], 1.0);

        h.set_reduced_motion(true);
        h.settle();
        assert!(h.scales().iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_scale_mode_scrolls_freely() {
        let mut h = five(CarouselConfig::default().mode(CarouselMode::Scale));
        assert!(h.wheel(WheelInput::vertical(100.0)));
        assert!(h.wheel(WheelInput::vertical(100.0)));
        assert_eq!(h.offset(), centre_of(7) + 200.0);
        h.settle();
        assert_eq!(h.offset(), centre_of(7) + 200.0);
        assert_eq!(h.active(), Some(8));

        h.drag(500.0, 300.0, 6);
        h.settle();
        assert_eq!(h.offset(), centre_of(7) - 100.0);
        assert_eq!(h.active(), Some(7));
    }

    #[test]
    fn test_zero_width_layout_is_inert() {
        let mut h =
            HeadlessCarousel::uniform(vec![1, 2, 3], None, CarouselConfig::default(), 0.0, 0.0, 800.0);
        h.init();
        h.settle();
        assert_eq!(h.carousel().set_width(), 0.0);
        assert_eq!(h.offset(), 0.0);
        assert!(!h.wheel(WheelInput::vertical(120.0)));
    }

    #[test]
    fn test_empty_and_unmeasured_controller() {
        let mut c = Carousel::<u8>::new(vec![], None, CarouselConfig::default());
        assert_eq!(c.init(Layout::default()), Response::default());
        assert_eq!(c.active(), None);

        // layout that does not cover the tripled sequence
        let mut c = Carousel::new(vec![1, 2], None, CarouselConfig::default());
        let r = c.init(Layout::strip(100.0, &[50.0; 2], 0.0));
        assert!(r.commands.is_empty());
        assert!(!c.on_key(&Key::ArrowRight).consumed);
    }

    #[test]
    fn test_controller_wheel_commands() {
        let mut c = Carousel::new(vec!['a'; 5], Some(2), CarouselConfig::default());
        c.init(Layout::strip(800.0, &[200.0; 15], 10.0));
        let r = c.on_wheel(WheelInput::vertical(120.0));
        assert!(r.consumed);
        assert_eq!(
            r.commands[0],
            Command::SetActive {
                previous: Some(7),
                next: 8
            }
        );
        assert_eq!(
            r.commands[1],
            Command::ScrollTo {
                left: centre_of(8),
                smooth: true
            }
        );
        assert!(matches!(
            r.commands[2],
            Command::ArmSettle { delay, .. } if delay == Duration::from_millis(140)
        ));
    }

    #[test]
    fn test_stale_tokens_and_teardown() {
        let mut c = Carousel::new(vec![(); 3], None, CarouselConfig::default());
        c.init(Layout::strip(300.0, &[100.0; 9], 0.0));
        assert_eq!(c.on_frame(TaskToken(42)), Response::default());
        assert_eq!(c.on_settle(TaskToken(42)), Response::default());

        let r = c.on_scroll(120.0);
        let Some(Command::RequestFrame(frame)) = r.commands.first().cloned() else {
            panic!("expected a frame request, got {:?}", r.commands);
        };
        // a second scroll while the frame is pending is coalesced
        assert!(c.on_scroll(130.0).commands.is_empty());

        let r = c.on_frame(frame);
        assert!(r.commands.iter().any(|c| matches!(c, Command::ArmSettle { .. })));
        c.on_pointer(PointerInput::down(0.0));
        let r = c.teardown();
        assert_eq!(
            r.commands.as_slice(),
            &[
                Command::CancelSettle,
                Command::SetDragging(false),
                Command::ReleasePointer(PointerId(1)),
            ]
        );
    }

    #[test]
    fn test_normalization_keeps_the_same_tile_centred() {
        let layout = Layout::strip(800.0, &[200.0; 15], 10.0);
        let seq = TileSequence::tripled(vec![(); 5], None);
        let mut s = LoopScroll::new();
        s.set_viewport_width(layout.viewport_width);
        s.set_content_width(layout.content_width);
        s.set_set_width(layout.span_width(seq.middle()));

        for step in 0..=100 {
            s.set_offset(step as f32 * 25.0);
            let before = s.get();
            let after = s.normalized().unwrap_or(before);
            let origin = |off: f32| {
                layout
                    .nearest_to_center(off)
                    .and_then(|i| seq.get(i))
                    .map(|t| t.origin)
            };
            assert_eq!(origin(before), origin(after), "offset {before}");
        }
    }
}
