// Simple command-line application to move pieces around

use clap::Parser;
use raychess::{board::PrettyStyle, Board, Setup};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Move pieces on a board built from a setup file")]
struct Args {
    /// Setup file with `<file> <PIECE>` records; the standard back row is used if omitted
    #[arg(long)]
    setup: Option<PathBuf>,
    /// Print Unicode chess symbols instead of letters
    #[arg(long)]
    utf8: bool,
}

fn parse_coords<const N: usize>(tokens: &[&str]) -> Option<[u8; N]> {
    if tokens.len() != N {
        return None;
    }
    let mut res = [0_u8; N];
    for (dst, tok) in res.iter_mut().zip(tokens) {
        *dst = tok.parse().ok()?;
    }
    Some(res)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let setup = match &args.setup {
        Some(path) => match Setup::load(path) {
            Ok(setup) => setup,
            Err(e) => {
                eprintln!("Bad setup: {}", e);
                std::process::exit(1);
            }
        },
        None => Setup::standard(),
    };
    let style = if args.utf8 {
        PrettyStyle::Utf8
    } else {
        PrettyStyle::Ascii
    };

    let mut board = Board::from_setup(&setup);
    println!("{}", board.pretty(style));

    let mut stdin = io::stdin().lock();
    loop {
        print!("> ");
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.split_first() {
            None => continue,
            Some((&"quit", _)) => break,
            Some((&"moves", rest)) => match parse_coords::<2>(rest) {
                Some([x, y]) => match board.pretty_moves(x, y, style) {
                    Ok(p) => print!("{}", p),
                    Err(e) => println!("Bad square: {}", e),
                },
                None => println!("Usage: moves <x> <y>"),
            },
            Some((&"move", rest)) => match parse_coords::<4>(rest) {
                Some([x, y, new_x, new_y]) => match board.move_figure(x, y, new_x, new_y) {
                    Ok(()) => println!("{}", board.pretty(style)),
                    Err(e) => println!("Bad move: {}", e),
                },
                None => println!("Usage: move <x> <y> <new_x> <new_y>"),
            },
            Some(_) => println!("Commands: moves <x> <y>, move <x> <y> <new_x> <new_y>, quit"),
        }
    }
}
