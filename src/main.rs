use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use maze_escape::{exit_cell, generate, spawn_cell, Chaser, Dir, Grid, Pos, Tile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const DEFAULT_SIZE: usize = 15;
const MIN_SIZE: usize = 5;
const DEFAULT_CHASE_MS: u64 = 400;
const PLAYER_MOVE_MS: u64 = 200;
const INPUT_HOLD_MS: u64 = 160;
const CELL_W: usize = 2;
const FRAME_MS: u64 = 16;

#[derive(Clone, Copy, PartialEq)]
enum Outcome {
    Escaped,
    Caught,
}

struct Game {
    grid: Grid,
    player: Pos,
    exit: Pos,
    chaser_pos: Pos,
    chaser: Chaser,
    moves: u32,
    outcome: Option<Outcome>,
}

impl Game {
    fn try_move(&mut self, dir: Dir) {
        if self.outcome.is_some() {
            return;
        }
        let (dx, dy) = dir.delta();
        let nx = self.player.x as isize + dx;
        let ny = self.player.y as isize + dy;
        if !self.grid.is_open(nx, ny) {
            return;
        }
        self.player = Pos::new(nx as usize, ny as usize);
        self.moves += 1;
        if self.player == self.exit {
            self.outcome = Some(Outcome::Escaped);
        } else if self.player == self.chaser_pos {
            self.outcome = Some(Outcome::Caught);
        }
    }

    fn chase_tick(&mut self, rng: &mut impl Rng) {
        if self.outcome.is_some() {
            return;
        }
        if let Some(next) = self.chaser.step(&self.grid, self.chaser_pos, self.player, rng) {
            self.chaser_pos = next;
            if self.chaser_pos == self.player {
                self.outcome = Some(Outcome::Caught);
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Chaser,
    Exit,
    Wall,
    Floor,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(size: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                size * size
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let (size, seed, chase_ms) = read_settings();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut game = new_game(size, &mut rng);
    let mut renderer = Renderer::new(size);
    let mut last_seen: [Option<Instant>; 4] = [None, None, None, None];
    let mut last_pressed: Option<Dir> = None;
    let mut last_player_move = Instant::now();
    let mut last_chase = Instant::now();
    let mut started = Instant::now();
    let frame_time = Duration::from_millis(FRAME_MS);

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('r') => {
                            game = new_game(size, &mut rng);
                            last_seen = [None, None, None, None];
                            last_pressed = None;
                            last_chase = Instant::now();
                            started = Instant::now();
                            renderer.needs_full = true;
                        }
                        KeyCode::Up | KeyCode::Char('w') => {
                            last_seen[idx_for_dir(Dir::Up)] = Some(Instant::now());
                            last_pressed = Some(Dir::Up);
                        }
                        KeyCode::Down | KeyCode::Char('s') => {
                            last_seen[idx_for_dir(Dir::Down)] = Some(Instant::now());
                            last_pressed = Some(Dir::Down);
                        }
                        KeyCode::Left | KeyCode::Char('a') => {
                            last_seen[idx_for_dir(Dir::Left)] = Some(Instant::now());
                            last_pressed = Some(Dir::Left);
                        }
                        KeyCode::Right | KeyCode::Char('d') => {
                            last_seen[idx_for_dir(Dir::Right)] = Some(Instant::now());
                            last_pressed = Some(Dir::Right);
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        if last_player_move.elapsed() >= Duration::from_millis(PLAYER_MOVE_MS) {
            if let Some(dir) = active_dir_recent(&last_seen, last_pressed) {
                game.try_move(dir);
                last_player_move = Instant::now();
            }
        }

        if last_chase.elapsed() >= Duration::from_millis(chase_ms) {
            last_chase = Instant::now();
            game.chase_tick(&mut rng);
        }

        render(stdout, &game, &mut renderer, started.elapsed())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_settings() -> (usize, Option<u64>, u64) {
    let size = std::env::var("MAZE_SIZE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v >= MIN_SIZE)
        .unwrap_or(DEFAULT_SIZE);
    let seed = std::env::var("MAZE_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());
    let chase_ms = std::env::var("MAZE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_CHASE_MS);
    (size, seed, chase_ms)
}

fn active_dir_recent(last_seen: &[Option<Instant>; 4], last_pressed: Option<Dir>) -> Option<Dir> {
    let now = Instant::now();
    if let Some(dir) = last_pressed {
        if let Some(t) = last_seen[idx_for_dir(dir)] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                return Some(dir);
            }
        }
    }
    let mut best: Option<(Dir, Instant)> = None;
    for (idx, dir) in [Dir::Up, Dir::Down, Dir::Left, Dir::Right].iter().enumerate() {
        if let Some(t) = last_seen[idx] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                match best {
                    None => best = Some((*dir, t)),
                    Some((_, bt)) if t > bt => best = Some((*dir, t)),
                    _ => {}
                }
            }
        }
    }
    best.map(|(dir, _)| dir)
}

fn idx_for_dir(dir: Dir) -> usize {
    match dir {
        Dir::Up => 0,
        Dir::Down => 1,
        Dir::Left => 2,
        Dir::Right => 3,
    }
}

fn new_game(size: usize, rng: &mut impl Rng) -> Game {
    let grid = generate(size, rng);
    let player = Pos::new(1, 1);
    let chaser_pos = spawn_cell(&grid, player, rng).expect("maze has open cells");
    Game {
        grid,
        player,
        exit: exit_cell(size),
        chaser_pos,
        chaser: Chaser::new(),
        moves: 0,
        outcome: None,
    }
}

fn render(
    stdout: &mut Stdout,
    game: &Game,
    renderer: &mut Renderer,
    elapsed: Duration,
) -> io::Result<()> {
    let size = game.grid.size();
    let needed_w = (size * CELL_W) as u16;
    let needed_h = (size + 2) as u16;
    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = match game.outcome {
        Some(Outcome::Escaped) => {
            format!("You escaped in {} moves! (r restart, q quit)", game.moves)
        }
        Some(Outcome::Caught) => {
            format!("Caught after {} moves. (r restart, q quit)", game.moves)
        }
        None => format!(
            "Moves: {}  Time: {}s  (arrows/wasd move, r restart, q quit)",
            game.moves,
            elapsed.as_secs()
        ),
    };
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..size {
        for x in 0..size {
            let cell = cell_for(game, Pos::new(x, y));
            let idx = y * size + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn cell_for(game: &Game, pos: Pos) -> Cell {
    if pos == game.player {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if pos == game.chaser_pos {
        return Cell {
            glyph: Glyph::Chaser,
            color: Color::Red,
        };
    }
    if pos == game.exit {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Green,
        };
    }
    match game.grid.tile(pos.x as isize, pos.y as isize) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Open => Cell {
            glyph: Glyph::Floor,
            color: Color::Reset,
        },
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    cell: Cell,
) -> io::Result<()> {
    let (text, color) = match cell.glyph {
        Glyph::Player => ("😃", cell.color),
        Glyph::Chaser => ("👹", cell.color),
        Glyph::Exit => ("🚪", cell.color),
        Glyph::Wall => ("██", cell.color),
        Glyph::Floor => ("  ", cell.color),
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
