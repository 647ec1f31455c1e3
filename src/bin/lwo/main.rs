//! lwo CLI - Tool for inspecting LightWave Object files.

use lwo::object::{Chunk, ChunkData, ChunkId, ObjectGraph};
use lwo::LwoObject;
use std::env;
use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Verbosity selected on the command line.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Info => "warn,lwo=info",
            Self::Debug => "lwo=debug",
            Self::Trace => "lwo=trace",
        }
    }
}

/// Options shared by all commands.
#[derive(Clone, Copy)]
struct Options {
    use_mmap: bool,
    json: bool,
}

fn init_logging(verbosity: Verbosity) {
    // RUST_LOG wins over the flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut verbosity = Verbosity::Info;
    let mut opts = Options { use_mmap: cfg!(feature = "mmap"), json: false };
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => verbosity = Verbosity::Debug,
            "-vv" | "--trace" => verbosity = Verbosity::Trace,
            "-q" | "--quiet" => verbosity = Verbosity::Quiet,
            "--no-mmap" => opts.use_mmap = false,
            "-j" | "--json" => opts.json = true,
            "-V" | "--version" => {
                print_version();
                return;
            }
            _ => filtered_args.push(arg),
        }
    }

    init_logging(verbosity);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    match filtered_args[0] {
        // Info command - show object summary
        "info" | "i" => cmd_info(require_file(&filtered_args, "info"), opts),

        // Tree command - show layers and their records
        "tree" | "t" => cmd_tree(require_file(&filtered_args, "tree"), opts),

        // Stats command - per-record details
        "stats" | "s" => cmd_stats(require_file(&filtered_args, "stats"), opts),

        // Help
        "help" | "h" | "-h" | "--help" => print_help(),

        // Default: if file exists, show info; otherwise error
        _ => {
            if Path::new(filtered_args[0]).exists() {
                cmd_info(filtered_args[0], opts);
            } else {
                eprintln!("Unknown command: {}", filtered_args[0]);
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    }
}

fn require_file<'a>(args: &[&'a str], command: &str) -> &'a str {
    match args.get(1) {
        Some(path) => path,
        None => {
            eprintln!("Error: missing file argument");
            eprintln!("Usage: lwo {} <file.lwo>", command);
            std::process::exit(1);
        }
    }
}

fn print_version() {
    println!(
        "lwo {} (built {} {})",
        env!("CARGO_PKG_VERSION"),
        env!("LWO_BUILD_DATE"),
        env!("LWO_BUILD_TIME")
    );
}

fn print_help() {
    println!("lwo - LightWave Object inspector");
    println!();
    println!("USAGE:");
    println!("    lwo [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    i, info   <file>              Show file type and record counts");
    println!("    t, tree   <file>              Show layers and the records they own");
    println!("    s, stats  <file>              Show every record with details");
    println!("    h, help                       Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Only show errors");
    println!("    -j, --json       Print JSON instead of text");
    println!("    --no-mmap        Read the whole file into memory instead of mapping it");
    println!("    -V, --version    Show version and build date");
    println!();
    println!("EXAMPLES:");
    println!("    lwo info cow.lwo                # Quick overview");
    println!("    lwo tree scene.lwo              # See layers");
    println!("    lwo stats --json old.lwo        # Dump everything as JSON");
    println!("    lwo -v info large.lwo           # Show each chunk as it is decoded");
    println!();
    println!("NOTES:");
    println!("    - Passing a .lwo file directly is equivalent to 'info'");
    println!("    - RUST_LOG overrides -v/-vv/-q");
}

fn open(path: &str, opts: Options) -> LwoObject {
    tracing::info!("Opening {}", path);
    match LwoObject::open_opts(path, opts.use_mmap) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Failed to serialize: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_info(path: &str, opts: Options) {
    let object = open(path, opts);
    let graph = object.graph();
    let s = graph.summary();
    tracing::debug!("Decoded {} chunks", s.chunks);

    if opts.json {
        print_json(&serde_json::json!({
            "file": path,
            "type": object.file_type().to_string(),
            "chunks": s.chunks,
            "layers": s.layers,
            "points": s.points,
            "polygon_lists": s.polygon_lists,
            "polygons": s.polygons,
            "detail_polygons": s.detail_polygons,
            "tag_names": s.tag_names,
            "surfaces": s.surfaces,
            "envelopes": s.envelopes,
            "clips": s.clips,
            "vertex_maps": s.vertex_maps,
        }));
        return;
    }

    println!("File: {}", path);
    println!("Type: {}", object.file_type());
    println!();
    println!("Records:");
    println!("  Layers:       {}", s.layers);
    println!("  Points:       {}", s.points);
    println!("  Polygons:     {} in {} lists", s.polygons, s.polygon_lists);
    if s.detail_polygons > 0 {
        println!("  Details:      {}", s.detail_polygons);
    }
    println!("  Tags:         {}", s.tag_names);
    println!("  Surfaces:     {}", s.surfaces);
    println!("  Envelopes:    {}", s.envelopes);
    println!("  Clips:        {}", s.clips);
    println!("  Vertex maps:  {}", s.vertex_maps);
    println!();
    println!("Total chunks: {}", s.chunks);
}

fn cmd_tree(path: &str, opts: Options) {
    let object = open(path, opts);
    let graph = object.graph();

    if opts.json {
        let layers: Vec<serde_json::Value> = graph
            .layers()
            .map(|(id, layer)| {
                let members: Vec<serde_json::Value> = graph
                    .members(id)
                    .map(|(mid, c)| {
                        serde_json::json!({
                            "id": mid.index(),
                            "kind": c.kind.to_string(),
                            "detail": describe(graph, c),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "index": layer.index,
                    "number": layer.number,
                    "name": layer.name,
                    "parent": layer.parent,
                    "implicit": layer.implicit,
                    "members": members,
                })
            })
            .collect();
        print_json(&serde_json::json!({ "file": path, "layers": layers }));
        return;
    }

    println!("File: {} [{}]", path, object.file_type());
    println!();
    for (id, layer) in graph.layers() {
        let name = if layer.name.is_empty() { "<unnamed>" } else { layer.name.as_str() };
        let implicit = if layer.implicit { " (implicit)" } else { "" };
        println!("Layer {} '{}'{}", layer.index, name, implicit);
        print_members(graph, id);
    }

    let globals: Vec<_> = graph.iter().filter(|(_, c)| c.layer.is_none()).collect();
    if !globals.is_empty() {
        println!("Global");
        for (id, chunk) in globals {
            println!("  {:?} {} {}", id, chunk.kind, describe(graph, chunk));
        }
    }
}

fn print_members(graph: &ObjectGraph, layer: ChunkId) {
    for (id, chunk) in graph.members(layer) {
        println!("  {:?} {} {}", id, chunk.kind, describe(graph, chunk));
    }
}

/// One-line description of a record.
fn describe(graph: &ObjectGraph, chunk: &Chunk) -> String {
    match &chunk.data {
        ChunkData::Layer(l) => format!("layer {} '{}'", l.index, l.name),
        ChunkData::Points(p) => {
            if p.is_empty() {
                "0 points".to_string()
            } else {
                let b = p.bounds();
                format!("{} points, bounds {:?} .. {:?}", p.len(), b.min.to_array(), b.max.to_array())
            }
        }
        ChunkData::Polygons(p) => {
            let points = graph.points_of(p).map(|pts| pts.len()).unwrap_or(0);
            let mut s = format!("{} {} polygons, {} indices over {} points", p.len(), p.poly_type.tag(), p.index_count(), points);
            if !p.details.is_empty() {
                s.push_str(&format!(", {} details", p.details.len()));
            }
            s
        }
        ChunkData::TagNames(t) => format!("{} tags", t.names.len()),
        ChunkData::PolyTags(m) => format!("{} {} pairs", m.pairs.len(), m.tag_type.tag()),
        ChunkData::SurfaceNames(s) => format!("{} surface names", s.names.len()),
        ChunkData::Surface(s) => format!(
            "surface '{}', {} properties, {} blocks",
            s.name,
            s.properties.len(),
            s.blocks.len()
        ),
        ChunkData::LegacySurface(s) => format!(
            "surface '{}', {} properties, {} textures",
            s.name,
            s.properties.len(),
            s.textures.len()
        ),
        ChunkData::Envelope(e) => format!("envelope {}, {} keys", e.index, e.keys.len()),
        ChunkData::Clip(c) => match c.clip_type {
            Some(t) => format!("clip {} ({})", c.index, t),
            None => format!("clip {}", c.index),
        },
        ChunkData::VertexMap(m) => format!("{} '{}' dim {}, {} entries", m.map_type, m.name, m.dimension, m.len()),
        ChunkData::BoundingBox(b) => match b.bbox() {
            Some(bb) => format!("bounds {:?} .. {:?}", bb.min.to_array(), bb.max.to_array()),
            None => format!("{} values", b.extents.len()),
        },
        ChunkData::Text(t) => format!("{:?}", t.text),
    }
}

fn cmd_stats(path: &str, opts: Options) {
    let object = open(path, opts);
    let graph = object.graph();

    if opts.json {
        let chunks: Vec<serde_json::Value> = graph
            .iter()
            .map(|(id, c)| {
                serde_json::json!({
                    "id": id.index(),
                    "kind": c.kind.to_string(),
                    "type": c.type_name(),
                    "layer": c.layer,
                    "detail": describe(graph, c),
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "file": path,
            "type": object.file_type().to_string(),
            "chunks": chunks,
        }));
        return;
    }

    println!("File: {} [{}]", path, object.file_type());
    println!();
    for (id, chunk) in graph.iter() {
        let layer = chunk.layer.map(|l| format!("L{}", l)).unwrap_or_else(|| "--".to_string());
        let id = format!("{:?}", id);
        println!("{:>5} {} {:<3} {:<13} {}", id, chunk.kind, layer, chunk.type_name(), describe(graph, chunk));
    }
}
