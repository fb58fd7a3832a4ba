//! Stellar Blitz terminal front end
//!
//! Menu, fixed-rate tick loop and keyboard capture. All game rules live in
//! the library; this binary only feeds `TickInput`/`dt` in and paints frames.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use stellar_blitz::consts::TICK_MS;
use stellar_blitz::highscores::{HighScores, now_timestamp};
use stellar_blitz::platform::{self, Clock};
use stellar_blitz::renderer::{
    self,
    terminal::{Glyphs, MenuView, Viewport, draw_frame, draw_menu},
};
use stellar_blitz::sim::{GameMode, RunOutcome, RunState, TickInput, advance};
use stellar_blitz::{Settings, TuningPreset};

const FRAME: Duration = Duration::from_millis(TICK_MS);

#[derive(Parser, Debug)]
#[command(name = "stellar-blitz")]
#[command(about = "Single-screen arcade shooter for the terminal")]
struct Cli {
    /// Game variant for this session (defaults to the saved setting)
    #[arg(value_enum)]
    preset: Option<PresetArg>,

    /// Fixed seed for every run this session
    #[arg(long)]
    seed: Option<u64>,

    /// Draw with plain ASCII characters
    #[arg(long)]
    ascii: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PresetArg {
    /// 800x600 arena with the boss fight
    Classic,
    /// 600x700 arena, quicker ship, no boss fight
    #[value(alias = "tall")]
    Portrait,
}

impl From<PresetArg> for TuningPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Classic => TuningPreset::Classic,
            PresetArg::Portrait => TuningPreset::Portrait,
        }
    }
}

impl Cli {
    /// Session settings: saved settings with command-line overrides on top
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(preset) = self.preset {
            settings.preset = preset.into();
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings.ascii_glyphs |= self.ascii;
        settings
    }
}

/// A key counts as held if its last press/repeat arrived within this many
/// frames (~130 ms at 60 Hz). Terminals without release events rely on the
/// OS key repeat to keep refreshing it.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
    })
}

fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> TickInput {
    use KeyCode::{Char, Down, Left, Right, Up};
    TickInput {
        up: is_held(key_frame, &[Up, Char('w'), Char('W')], frame),
        down: is_held(key_frame, &[Down, Char('s'), Char('S')], frame),
        left: is_held(key_frame, &[Left, Char('a'), Char('A')], frame),
        right: is_held(key_frame, &[Right, Char('d'), Char('D')], frame),
        fire: is_held(key_frame, &[Char(' ')], frame),
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Start,
    Mode,
    Exit,
}

const MENU_ITEMS: [MenuItem; 3] = [MenuItem::Start, MenuItem::Mode, MenuItem::Exit];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Start(GameMode),
    Quit,
}

#[derive(Debug, Clone)]
struct Menu {
    selected: usize,
    mode: GameMode,
    available: Vec<GameMode>,
}

impl Menu {
    fn new(mode: GameMode, available: Vec<GameMode>) -> Self {
        Self {
            selected: 0,
            mode,
            available,
        }
    }

    fn labels(&self) -> Vec<String> {
        MENU_ITEMS
            .iter()
            .map(|item| match item {
                MenuItem::Start => "Start Game".to_string(),
                MenuItem::Mode => format!("Mode: {}", self.mode.as_str()),
                MenuItem::Exit => "Exit".to_string(),
            })
            .collect()
    }

    fn up(&mut self) {
        self.selected = (self.selected + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }

    fn down(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS.len();
    }

    fn cycle_mode(&mut self) {
        self.mode = self.mode.cycle(&self.available);
    }

    /// Activate the highlighted item; cycling the mode keeps the menu open
    fn activate(&mut self) -> Option<MenuAction> {
        match MENU_ITEMS[self.selected] {
            MenuItem::Start => Some(MenuAction::Start(self.mode)),
            MenuItem::Mode => {
                self.cycle_mode();
                None
            }
            MenuItem::Exit => Some(MenuAction::Quit),
        }
    }
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    menu: &mut Menu,
    scores: &HighScores,
    preset: TuningPreset,
    last_run: Option<&str>,
) -> std::io::Result<MenuAction> {
    let now = now_timestamp();
    loop {
        let labels = menu.labels();
        let view = MenuView {
            items: &labels,
            selected: menu.selected,
            preset: preset.as_str(),
            bests: menu
                .available
                .iter()
                .map(|&mode| scores.best_line(mode, now))
                .collect(),
            last_run,
        };
        draw_menu(out, &view, Viewport::current()?)?;

        // Block until the next key; the reader thread ending means stdin is gone
        let Ok(event) = rx.recv() else {
            return Ok(MenuAction::Quit);
        };
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => menu.up(),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => menu.down(),
            KeyCode::Left | KeyCode::Right if MENU_ITEMS[menu.selected] == MenuItem::Mode => {
                menu.cycle_mode()
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(action) = menu.activate() {
                    return Ok(action);
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(MenuAction::Quit);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuAction::Quit);
            }
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunEnd {
    Finished(RunOutcome),
    /// Player left for the menu before the run ended
    Abandoned,
    /// Ctrl-C: leave the program
    Quit,
}

/// Drive one run at ~60 Hz until the simulation raises its terminal signal.
///
/// Held keys are tracked as "frame last seen" so movement and fire combine
/// freely. Terminals with keyboard enhancement send releases and drop keys
/// immediately; others let keys expire after `HOLD_WINDOW` frames.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut RunState,
    rx: &mpsc::Receiver<Event>,
    glyphs: Glyphs,
) -> std::io::Result<RunEnd> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut clock = Clock::new();
    let mut frame: u64 = 0;
    let mut paused = false;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(RunEnd::Quit);
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(RunEnd::Abandoned);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            paused = !paused;
                            log::info!("{}", if paused { "Paused" } else { "Resumed" });
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // Time spent paused never reaches the simulation
        let dt = clock.delta();
        if !paused {
            let input = held_input(&key_frame, frame);
            if let Some(outcome) = advance(state, &input, dt) {
                return Ok(RunEnd::Finished(outcome));
            }
        }

        draw_frame(out, &renderer::snapshot(state), Viewport::current()?, glyphs, paused)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

/// One-line summary shown on the menu after a run
fn run_summary(mode: GameMode, end: RunEnd, score: u64, rank: Option<usize>) -> String {
    let how = match end {
        RunEnd::Finished(outcome) => outcome.as_str(),
        RunEnd::Abandoned | RunEnd::Quit => "Abandoned",
    };
    match rank {
        Some(rank) => format!("{} - {}: {} points (#{} best)", mode.as_str(), how, score, rank),
        None => format!("{} - {}: {} points", mode.as_str(), how, score),
    }
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, cli: &Cli) -> std::io::Result<()> {
    // Only the selected mode is written back; overrides last one session
    let mut stored = Settings::load();
    let settings = cli.apply(stored.clone());
    let mut scores = HighScores::load();
    let tuning = settings.tuning();
    let glyphs = Glyphs::pick(settings.ascii_glyphs);
    let mut menu = Menu::new(settings.effective_mode(&tuning), tuning.available_modes());
    let mut last_run: Option<String> = None;

    log::info!(
        "Preset {} ({}x{} arena)",
        settings.preset.as_str(),
        tuning.arena_width,
        tuning.arena_height
    );

    loop {
        let action = show_menu(out, rx, &mut menu, &scores, settings.preset, last_run.as_deref())?;
        let mode = match action {
            MenuAction::Quit => break,
            MenuAction::Start(mode) => mode,
        };

        if stored.mode != mode {
            stored.mode = mode;
            stored.save();
        }

        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        log::info!("Starting {} run with seed {}", mode.as_str(), seed);
        let mut state = RunState::new(mode, tuning.clone(), seed);
        let end = game_loop(out, &mut state, rx, glyphs)?;

        let rank = match end {
            RunEnd::Finished(_) => {
                let rank = scores.add_score(mode, state.score, state.elapsed, now_timestamp());
                if rank.is_some() {
                    scores.save();
                }
                rank
            }
            RunEnd::Abandoned | RunEnd::Quit => None,
        };
        last_run = Some(run_summary(mode, end, state.score, rank));
        state.clear_field();

        if end == RunEnd::Quit {
            break;
        }
    }

    if stored.mode != menu.mode {
        stored.mode = menu.mode;
        stored.save();
    }
    Ok(())
}

/// Route log output to the data directory so it never lands on the alternate screen
fn init_logging() {
    let path = platform::log_path();
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let file = path
        .parent()
        .map(std::fs::create_dir_all)
        .transpose()
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

fn main() -> std::io::Result<()> {
    // Parsed before raw mode so `--help` and errors print normally
    let cli = Cli::parse();
    init_logging();
    log::info!("Stellar Blitz starting...");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release/repeat events where the terminal supports them
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &cli);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match &result {
        Ok(()) => log::info!("Stellar Blitz exiting"),
        Err(e) => log::error!("Terminal error: {}", e),
    }
    result
}
