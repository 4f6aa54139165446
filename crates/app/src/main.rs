//! Entry point: ingest OBJ files and report the resulting buffers.
//!
//! Usage: app [--no-relative-indices] [--dump] [--log=<filter>] <file.obj>...

use anyhow::{Context, Result, bail};
use asset::{LoadOptions, ObjReader, batch};

struct Args {
    paths: Vec<String>,
    options: LoadOptions,
    dump: bool,
    log_filter: String,
}

fn parse_args() -> Result<Args> {
    let mut paths = Vec::new();
    let mut options = LoadOptions::default();
    let mut dump = false;
    let mut log_filter = String::from("info");

    for arg in std::env::args().skip(1) {
        if arg == "--no-relative-indices" {
            options.allow_relative_indices = false;
        } else if arg == "--dump" {
            dump = true;
        } else if let Some(val) = arg.strip_prefix("--log=") {
            log_filter = val.to_owned();
        } else if arg.starts_with("--") {
            eprintln!("[warn] Unknown flag '{}', ignoring.", arg);
        } else {
            paths.push(arg);
        }
    }

    if paths.is_empty() {
        bail!("usage: app [--no-relative-indices] [--dump] [--log=<filter>] <file.obj>...");
    }

    Ok(Args {
        paths,
        options,
        dump,
        log_filter,
    })
}

fn report(reader: &ObjReader, dump: bool) {
    let name = reader
        .file_name()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    log::info!(
        "{}: {} positions, {} texcoords, {} normals -> {} unique vertices, {} triangles",
        name,
        reader.positions().len(),
        reader.texture_coordinates().len(),
        reader.normals().len(),
        reader.vertices().len(),
        reader.mesh().triangle_count()
    );

    if dump {
        for (i, v) in reader.vertices().iter().enumerate() {
            println!(
                "{:>6}: pos={:?} uv={:?} n={:?}",
                i, v.position, v.tex_coord, v.normal
            );
        }
        for tri in reader.indices().chunks_exact(3) {
            println!("{} {} {}", tri[0], tri[1], tri[2]);
        }
    }
}

fn main() -> Result<()> {
    let args = parse_args()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_filter))
        .init();

    if let [path] = args.paths.as_slice() {
        let reader = ObjReader::from_path(path, args.options)
            .with_context(|| format!("Failed to ingest {}", path))?;
        report(&reader, args.dump);
        return Ok(());
    }

    let mut failures = 0usize;
    for entry in batch::load_many(&args.paths, args.options) {
        match entry.result {
            Ok(reader) => report(&reader, args.dump),
            Err(err) => {
                log::error!("Failed to ingest {}: {}", entry.path.display(), err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} files failed to ingest", failures, args.paths.len());
    }
    Ok(())
}
