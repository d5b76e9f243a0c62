use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::{
    io::{AsyncBufReadExt as _, BufReader},
    sync::mpsc,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pentween", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a lesson.
    Validate(LessonArgs),
    /// Render every step at once and print the final shapes as JSON.
    Static(RunArgs),
    /// Step through a lesson from the terminal.
    Play(RunArgs),
}

#[derive(Parser, Debug)]
struct LessonArgs {
    /// Lesson JSON.
    #[arg(long)]
    lesson: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Lesson JSON.
    #[arg(long)]
    lesson: PathBuf,

    /// Playback config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds each stroke takes on the recording surface.
    #[arg(long, default_value_t = 0.25)]
    draw_seconds: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Static(args) => cmd_static(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_lesson(path: &Path) -> anyhow::Result<pentween::Lesson> {
    pentween::Lesson::from_path(path).with_context(|| format!("load lesson '{}'", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<pentween::PlaybackConfig> {
    match path {
        Some(path) => pentween::PlaybackConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(pentween::PlaybackConfig::default()),
    }
}

fn check_draw_seconds(secs: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        pentween::is_valid_seconds(secs),
        "--draw-seconds must be finite and within 0..={}",
        pentween::MAX_SECONDS
    );
    Ok(())
}

fn print_snapshot(surface: &pentween::LogSurface) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&surface.snapshot()).context("serialize snapshot")?;
    println!("{json}");
    Ok(())
}

fn cmd_validate(args: LessonArgs) -> anyhow::Result<()> {
    let lesson = read_lesson(&args.lesson)?;
    eprintln!(
        "ok: '{}' ({} steps, {} actions)",
        lesson.title,
        lesson.steps.len(),
        lesson.action_count()
    );
    Ok(())
}

fn cmd_static(args: RunArgs) -> anyhow::Result<()> {
    check_draw_seconds(args.draw_seconds)?;
    let lesson = read_lesson(&args.lesson)?;
    let config = read_config(args.config.as_deref())?;

    let surface = pentween::LogSurface::with_draw_seconds(args.draw_seconds);
    let mut view = pentween::Diagram::static_view(Arc::new(surface.clone()), config);
    let steps = pentween::LessonScript::script(&lesson).run_all(&mut view);
    tracing::info!(steps, "static render done");

    print_snapshot(&surface)
}

fn parse_key(line: &str) -> Option<pentween::Key> {
    let key = match line.trim().to_ascii_lowercase().as_str() {
        "" | "n" | "next" | "space" => pentween::Key::Space,
        "right" => pentween::Key::ArrowRight,
        "enter" | "s" | "start" | "stop" => pentween::Key::Enter,
        "esc" | "escape" => pentween::Key::Escape,
        "q" | "quit" => return None,
        _ => pentween::Key::Other,
    };
    Some(key)
}

fn cmd_play(args: RunArgs) -> anyhow::Result<()> {
    check_draw_seconds(args.draw_seconds)?;
    let lesson = read_lesson(&args.lesson)?;
    let config = read_config(args.config.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build async runtime")?;

    runtime.block_on(async move {
        let animated = pentween::LogSurface::with_draw_seconds(args.draw_seconds);
        let static_surface = pentween::LogSurface::with_draw_seconds(args.draw_seconds);
        let mut paginator = pentween::Paginator2D::new(
            pentween::Diagram::animated(Arc::new(animated.clone()), config.clone()),
            pentween::Diagram::static_view(Arc::new(static_surface.clone()), config.clone()),
            Arc::new(lesson),
            config,
        );
        paginator.render_static();

        let mut ui = paginator.subscribe();
        let (tx, rx) = mpsc::channel(16);
        eprintln!("{}", *ui.borrow_and_update());
        eprintln!("keys: enter = start/stop, n/space/right = next, esc = stop, q = quit");

        let front = async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        let line = match line.context("read stdin")? {
                            Some(line) => line,
                            None => break,
                        };
                        // Keys typed ahead wait for the playing step.
                        loop {
                            let busy = ui.borrow_and_update().is_busy();
                            if !busy || ui.changed().await.is_err() {
                                break;
                            }
                            eprintln!("{}", *ui.borrow());
                        }
                        let Some(key) = parse_key(&line) else { break };
                        let control = key.control(&ui.borrow_and_update());
                        if let Some(control) = control {
                            if tx.send(control).await.is_err() {
                                break;
                            }
                            // Every accepted control changes the panel.
                            if ui.changed().await.is_err() {
                                break;
                            }
                            eprintln!("{}", *ui.borrow_and_update());
                        }
                    }
                    changed = ui.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        eprintln!("{}", *ui.borrow_and_update());
                    }
                }
            }
            anyhow::Ok(())
        };

        let ((), front) = tokio::join!(paginator.run(rx), front);
        front?;
        eprintln!("{}", paginator.ui());

        let shown = if paginator.is_animating() {
            &animated
        } else {
            &static_surface
        };
        print_snapshot(shown)?;
        paginator.dispose();
        Ok(())
    })
}
