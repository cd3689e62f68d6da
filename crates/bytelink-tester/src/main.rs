//! Host-side exerciser for the FIFO + frame extractor. Feeds a
//! hex-encoded byte stream through a `ByteFifo` in chunks, simulating
//! bursty UART arrival, and prints every frame that comes out.

use std::io::Read;

use bytelink_fifo::__log::LevelFilter;
use bytelink_fifo::fifo::{ByteFifo, FifoRead, FifoWrite};
use bytelink_frame::{FrameError, extract_frame_atomic};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
struct Args {
    /// Hex-encoded byte stream (whitespace ignored). Read from stdin
    /// when omitted.
    hex: Option<String>,

    /// Bytes pushed into the FIFO per burst.
    #[arg(long, default_value_t = 16)]
    chunk: usize,

    /// Backing storage size of the FIFO (usable capacity is one less).
    #[arg(long, default_value_t = 512)]
    capacity: usize,
}

fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err("odd number of hex digits".to_string());
    }

    digits
        .chunks(2)
        .map(|pair| {
            let s: String = pair.iter().collect();
            u8::from_str_radix(&s, 16).map_err(|e| format!("bad hex byte {:?}: {}", s, e))
        })
        .collect()
}

fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let input = match args.hex {
        Some(hex) => hex,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap();
            buf
        }
    };
    let stream = parse_hex(&input).unwrap_or_else(|e| {
        eprintln!("invalid input: {}", e);
        std::process::exit(1);
    });

    let mut storage = vec![0u8; args.capacity];
    let mut fifo = ByteFifo::new(&mut storage);
    let (mut prod, mut cons) = fifo.split();

    let mut dest = vec![0u8; args.capacity];
    let mut frames = 0usize;

    for burst in stream.chunks(args.chunk.max(1)) {
        if let Err(e) = prod.write(burst) {
            eprintln!(
                "FIFO overrun after {} extracted frames: {:?} (burst of {}, free {})",
                frames,
                e,
                burst.len(),
                prod.free()
            );
            std::process::exit(1);
        }
        info!("pushed burst of {} bytes", burst.len());

        loop {
            match extract_frame_atomic(&mut cons, &mut dest) {
                Ok(total) => {
                    println!("frame {}: {}", frames, hex_string(&dest[..total]));
                    frames += 1;
                }
                Err(FrameError::SyncNotFound) | Err(FrameError::InsufficientData) => break,
                Err(e @ FrameError::DestinationTooSmall) => {
                    eprintln!("frame larger than FIFO capacity: {:?}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    println!(
        "{} frames extracted, {} bytes left buffered",
        frames,
        cons.len()
    );
}
