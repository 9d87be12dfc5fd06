use ggez::{
    conf::{FullscreenType, WindowMode, WindowSetup},
    event, ContextBuilder,
};
use litecycles::{
    app::{App, WINDOW_TITLE},
    config::AppConfig,
    error::AppError,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    let fullscreen = if config.start_fullscreen {
        FullscreenType::Desktop
    } else {
        FullscreenType::Windowed
    };

    let cb = ContextBuilder::new("litecycles", "litecycles")
        .window_setup(WindowSetup::default().title(WINDOW_TITLE))
        .window_mode(
            WindowMode::default()
                .dimensions(config.window_width, config.window_height)
                .fullscreen_type(fullscreen)
                .resizable(false),
        );
    let (mut ctx, event_loop) = cb.build()?;

    tracing::info!(
        width = config.window_width,
        height = config.window_height,
        fps = config.target_fps,
        "Lite Cycles starting"
    );
    let app = App::new(&mut ctx, &config);
    event::run(ctx, event_loop, app)
}
