mod config;

use anyhow::Context;
use peyote_core::{BeadType, Collection, Color, Design, Session, Texture, Tool};
use std::env;
use std::io::{self, Write};

use config::CliConfig;

fn print_help() {
    println!(
        r#"OpenPeyote CLI {}

            Commands:
            new <design.peyd> <name> <track_width> <tracks> <height>
            info <design.peyd>
            beads <design.peyd>
            paint <design.peyd> <col> <row> <bead name...>
            erase <design.peyd> <col> <row>
            catalog
            new-collection <file.peyc> <name>
            add-bead <file.peyc> <name> <#base> [#highlight] [matte|polished|flat] [catalog_number]
            repl <design.peyd>

            Examples:
            cargo run -p peyote_cli -- new bracelet.peyd "Bracelet" 5 10 40
            cargo run -p peyote_cli -- paint bracelet.peyd 7 3 Test red
            cargo run -p peyote_cli -- beads bracelet.peyd
        "#,
        peyote_core::version()
    );
}

fn print_info(design: &Design) {
    let grid = design.grid();
    println!("Design: {}", design.name());
    println!(
        "  {} tracks x {} beads wide, {} rows ({} x {} cells)",
        grid.track_count(),
        grid.track_width(),
        grid.row_count(),
        grid.width(),
        grid.height()
    );
    println!("  painted cells: {}", design.painted_count());
    if let Some(path) = design.filepath() {
        println!("  file: {}", path.display());
    }
}

fn print_beads(design: &Design) {
    let doc = design.to_document();
    if doc.beads.is_empty() {
        println!("(no beads placed)");
        return;
    }
    for bead in &doc.beads {
        println!("  col {:>3} row {:>3} | {}", bead.x, bead.y, bead.bead_type);
    }
}

fn print_catalog(session: &Session) {
    if session.catalog.collections().is_empty() {
        println!("(catalog is empty)");
        return;
    }
    for collection in session.catalog.collections() {
        println!("{} ({})", collection.name(), collection.len());
        for b in collection.bead_types() {
            println!(
                "  {:<20} | {:<10} | base {} highlight {} | {:?}",
                b.name(),
                b.catalog_number().unwrap_or("-"),
                b.base_color(),
                b.highlight_color(),
                b.texture()
            );
        }
    }
}

fn parse_cell(col: Option<&String>, row: Option<&String>) -> anyhow::Result<(usize, usize)> {
    let col: usize = col
        .context("missing <col>")?
        .parse()
        .context("col must be a number")?;
    let row: usize = row
        .context("missing <row>")?
        .parse()
        .context("row must be a number")?;
    Ok((col, row))
}

fn repl(session: &mut Session, design_path: &str) -> anyhow::Result<()> {
    let mut design = session
        .open_design(design_path)
        .with_context(|| format!("failed to open design '{design_path}'"))?;

    println!("Loaded design: {}", design.name());
    println!("Type 'help' for commands. 'quit' to exit.");

    loop {
        print!("peyote> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF (Ctrl+D)
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "help" => {
                println!(
                    r#"Commands:
                        select <bead name...>
                        tool bead|remove
                        click <col> <row>   (applies the active tool)
                        cell <col> <row>
                        info
                        beads
                        catalog
                        save
                        quit
                        "#
                );
            }
            "quit" | "exit" => break,

            "select" => {
                if parts.len() < 2 {
                    println!("Usage: select <bead name...>");
                    continue;
                }
                let name = parts[1..].join(" ");
                match session.select_working_bead(&name) {
                    Some(b) => println!("Working bead: {} ({})", b.name(), b.base_color()),
                    None => println!("Unknown bead '{name}'. Type: catalog"),
                }
            }

            "tool" => {
                session.tool = match parts.get(1).map(|s| s.to_lowercase()).as_deref() {
                    Some("bead") => Tool::Bead,
                    Some("remove") => Tool::Remove,
                    _ => {
                        println!("Usage: tool bead|remove");
                        continue;
                    }
                };
                println!("Tool: {:?}", session.tool);
            }

            "click" | "cell" => {
                let (col, row) = match (parts.get(1), parts.get(2)) {
                    (Some(c), Some(r)) => match (c.parse::<usize>(), r.parse::<usize>()) {
                        (Ok(c), Ok(r)) => (c, r),
                        _ => {
                            println!("Usage: {cmd} <col> <row>");
                            continue;
                        }
                    },
                    _ => {
                        println!("Usage: {cmd} <col> <row>");
                        continue;
                    }
                };

                if cmd == "click" {
                    if let Err(e) = session.apply_tool(&mut design, row, col) {
                        println!("{e}");
                        continue;
                    }
                }
                match design.get_cell(row, col) {
                    Ok(b) => println!("col {col} row {row} = {}", b.name()),
                    Err(e) => println!("{e}"),
                }
            }

            "info" => print_info(&design),
            "beads" => print_beads(&design),
            "catalog" => print_catalog(session),

            "save" => {
                design.save(design_path)?;
                println!("Saved design: {design_path}");
            }

            _ => println!("Unknown command. Type 'help'."),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let config = CliConfig::load()?;
    let mut session = config.session()?;

    match args[1].as_str() {
        "new" => {
            let path = args.get(2).context("missing <design.peyd>")?;
            let name = args.get(3).context("missing <name>")?;
            let track_width: usize = args
                .get(4)
                .context("missing <track_width>")?
                .parse()
                .context("track_width must be a number")?;
            let tracks: usize = args
                .get(5)
                .context("missing <tracks>")?
                .parse()
                .context("tracks must be a number")?;
            let height: usize = args
                .get(6)
                .context("missing <height>")?
                .parse()
                .context("height must be a number")?;

            let path = peyote_core::design::with_extension_if_missing(
                path,
                peyote_core::DESIGN_EXTENSION,
            );
            let mut design = session.new_design(name, track_width, tracks, height)?;
            design.save(&path)?;
            println!("Created design '{}' in {}", design.name(), path.display());
        }
        "info" => {
            let path = args.get(2).context("missing <design.peyd>")?;
            let design = session.open_design(path)?;
            print_info(&design);
        }
        "beads" => {
            let path = args.get(2).context("missing <design.peyd>")?;
            let design = session.open_design(path)?;
            print_beads(&design);
        }
        "paint" => {
            let path = args.get(2).context("missing <design.peyd>")?;
            let (col, row) = parse_cell(args.get(3), args.get(4))?;
            let name = args.get(5..).map(|rest| rest.join(" ")).unwrap_or_default();
            if name.is_empty() {
                anyhow::bail!("missing <bead name>");
            }

            let mut design = session
                .open_design(path)
                .with_context(|| format!("failed to open design '{path}'"))?;
            session
                .select_working_bead(&name)
                .with_context(|| format!("unknown bead '{name}'. Run `catalog` to list beads"))?;
            session.tool = Tool::Bead;
            session.apply_tool(&mut design, row, col)?;
            design.save(path)?;
            println!("Painted col {col} row {row} with '{name}' and saved {path}");
        }
        "erase" => {
            let path = args.get(2).context("missing <design.peyd>")?;
            let (col, row) = parse_cell(args.get(3), args.get(4))?;

            let mut design = session
                .open_design(path)
                .with_context(|| format!("failed to open design '{path}'"))?;
            session.tool = Tool::Remove;
            session.apply_tool(&mut design, row, col)?;
            design.save(path)?;
            println!("Erased col {col} row {row} and saved {path}");
        }
        "catalog" => print_catalog(&session),
        "new-collection" => {
            let path = args.get(2).context("missing <file.peyc>")?;
            let name = args.get(3).context("missing <name>")?;
            let path = peyote_core::design::with_extension_if_missing(
                path,
                peyote_core::COLLECTION_EXTENSION,
            );
            Collection::new(name.as_str()).save(&path)?;
            println!("Created collection '{name}' in {}", path.display());
        }
        "add-bead" => {
            let path = args.get(2).context("missing <file.peyc>")?;
            let name = args.get(3).context("missing <name>")?;
            let base = args
                .get(4)
                .context("missing <#base>")?
                .parse::<Color>()
                .context("base color must look like #rrggbb")?;

            let mut bead = BeadType::new(name.as_str(), base);
            if let Some(highlight) = args.get(5) {
                bead = bead.with_highlight(
                    highlight
                        .parse::<Color>()
                        .context("highlight color must look like #rrggbb")?,
                );
            }
            if let Some(texture) = args.get(6) {
                bead = bead.with_texture(texture.parse::<Texture>().map_err(anyhow::Error::msg)?);
            }
            if let Some(number) = args.get(7) {
                bead = bead.with_catalog_number(number.as_str());
            }

            let mut collection = Collection::open(path)
                .with_context(|| format!("failed to open collection '{path}'"))?;
            collection.push(bead);
            collection.save(path)?;
            println!(
                "Added '{name}' to collection '{}' ({} bead types)",
                collection.name(),
                collection.len()
            );
        }
        "repl" => {
            let path = args.get(2).context("missing <design.peyd>")?;
            repl(&mut session, path)?;
        }

        _ => print_help(),
    }

    Ok(())
}
