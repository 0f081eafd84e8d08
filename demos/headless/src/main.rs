//! Scripted session against the headless host. Run with `RUST_LOG=debug` to
//! watch loop normalization and settle handling. An optional first argument
//! names a JSON file with a partial `CarouselConfig`.

use anyhow::Context;
use reel_core::animation::{AnimationSpec, Easing};
use reel_core::headless::HeadlessCarousel;
use reel_core::*;
use std::time::Duration;

const TITLES: [&str; 6] = ["intro", "atlas", "harbor", "kiln", "meridian", "outro"];

fn session(config: CarouselConfig) -> HeadlessCarousel<&'static str> {
    let mut h = HeadlessCarousel::uniform(TITLES.to_vec(), Some(3), config, 240.0, 12.0, 900.0)
        .with_smooth_spec(AnimationSpec::tween(Duration::from_millis(220), Easing::EaseInOut));
    h.init();
    h.settle();
    h
}

fn report(step: &str, h: &HeadlessCarousel<&'static str>) {
    let title = h
        .active()
        .and_then(|i| h.carousel().sequence().get(i))
        .map(|t| t.content)
        .unwrap_or("-");
    log::info!(
        "{step:<12} offset={:>7.1} active={:?} ({title}) {}",
        h.offset(),
        h.active(),
        h.markers()
    );
}

fn load_config(json: &str) -> anyhow::Result<CarouselConfig> {
    let config: CarouselConfig = serde_json::from_str(json).context("parse config")?;
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
            load_config(&json)?
        }
        None => CarouselConfig::default(),
    };
    config.validate().context("config")?;
    let mut h = session(config);
    report("init", &h);

    for _ in 0..4 {
        h.wheel(WheelInput::vertical(120.0));
        h.settle();
        report("wheel", &h);
    }

    h.drag(450.0, -400.0, 12);
    let clicked = h.click();
    h.settle();
    report("drag", &h);
    log::info!("click after drag delivered: {clicked}");

    h.key(Key::ArrowLeft);
    h.settle();
    report("arrow-left", &h);

    h.resize(Layout::strip(640.0, &[240.0; 18], 12.0));
    report("resize", &h);

    let scale = CarouselConfig::default().mode(CarouselMode::Scale);
    scale.validate().context("scale config")?;
    let mut h = session(scale);
    h.wheel(WheelInput::vertical(90.0));
    h.settle();
    report("scale", &h);
    let scales: Vec<String> = h.scales().iter().map(|s| format!("{s:.3}")).collect();
    log::info!("scales {}", scales.join(" "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = load_config(r#"{ "mode": "scale", "settle_delay": 200 }"#).unwrap();
        assert_eq!(cfg.mode, CarouselMode::Scale);
        assert_eq!(cfg.settle_delay, Duration::from_millis(200));
        assert_eq!(cfg.drag_threshold, 8.0);
        assert_eq!(cfg.hooks.container_id, "workScroller");
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        assert!(load_config(r#"{ "settle_delay": 0 }"#).is_err());
        assert!(load_config(r#"{ "mode": "spin" }"#).is_err());
    }

    #[test]
    fn scripted_session_ends_centred() {
        let mut h = session(CarouselConfig::default());
        for _ in 0..8 {
            h.key(Key::ArrowRight);
            h.settle();
        }
        assert_eq!(h.centered(), h.active());
    }
}
