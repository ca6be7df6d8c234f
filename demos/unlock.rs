use std::env;
use std::fs::File;

use tcvault::Result;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let (path, password) = match (args.next(), args.next()) {
        (Some(path), Some(password)) => (path, password),
        _ => {
            eprintln!("usage: unlock <volume-path> <password>");
            std::process::exit(1);
        }
    };

    let file = File::open(&path)?;
    let mut volume = tcvault::unlock(file, password.as_bytes(), |msg| eprintln!("progress: {msg}"))?;

    println!("cascade        : {}", volume.cascade_name());
    println!("hash           : {}", volume.hash_name());
    println!("hidden         : {}", volume.is_hidden());
    println!("format version : {:#06x}", volume.format_version());
    println!("min prog ver   : {:#06x}", volume.min_program_version());
    println!("volume created : {}", volume.volume_created_at());
    println!("header created : {}", volume.header_created_at());
    println!("sectors        : {}", volume.sector_count());

    if let Ok(sector) = volume.read_sector(1) {
        println!("first sector (hex): {}", hex(&sector));
    }

    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}
