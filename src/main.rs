use kindred::layout::{GenerationSpacing, LayoutEngine, LineageLayout};
use kindred::loader::{load_dataset, load_lineage};
use kindred::resolver::TraversalLimits;
use kindred::scene::Session;
use kindred::svg::SvgRenderer;
use std::env;
use std::fs;
use std::process;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <input.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>        Output file (default: stdout)");
    eprintln!("  -r, --root <id>            Person to center the tree on");
    eprintln!("  -a, --ancestors <n>        Ancestor generations (default: 10)");
    eprintln!("  -d, --descendants <n|all>  Visible descendant generations (default: 2)");
    eprintln!("  -l, --lineage              Input is a flat list with parent links");
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut root: Option<String> = None;
    let mut limits = TraversalLimits::default();
    let mut lineage = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-r" | "--root" => {
                i += 1;
                if i < args.len() {
                    root = Some(args[i].clone());
                }
            }
            "-a" | "--ancestors" => {
                i += 1;
                if i < args.len() {
                    limits.max_ancestor_depth = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid ancestor depth: {}", args[i]);
                        process::exit(1);
                    });
                }
            }
            "-d" | "--descendants" => {
                i += 1;
                if i < args.len() {
                    limits.visible_descendant_depth = match args[i].as_str() {
                        "all" => None,
                        n => Some(n.parse().unwrap_or_else(|_| {
                            eprintln!("Invalid descendant depth: {}", n);
                            process::exit(1);
                        })),
                    };
                }
            }
            "-l" | "--lineage" => lineage = true,
            "-h" | "--help" => usage(&args[0]),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let svg = if lineage {
        let lineage = match load_lineage(&input) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Load error: {}", e);
                process::exit(1);
            }
        };
        let layout = LineageLayout::compute(&lineage, &GenerationSpacing::default());
        SvgRenderer::default().render_lineage(&layout)
    } else {
        let dataset = match load_dataset(&input) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Load error: {}", e);
                process::exit(1);
            }
        };
        let root = match root.or_else(|| dataset.default_focus().map(str::to_string)) {
            Some(r) => r,
            None => {
                eprintln!("Dataset has no people");
                process::exit(1);
            }
        };
        let session = match Session::new(dataset, &root, limits) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        };
        let layout = LayoutEngine::default().layout(session.scene(), session.dataset());
        SvgRenderer::default().render(&layout)
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &svg) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", svg),
    }
}
