use anyhow::Result;
use isaacsmith::ModManager;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut mods_path: Option<PathBuf> = None;
    let mut config_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mods" | "-m" => {
                if let Some(path) = args.next() {
                    mods_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("--mods requires a path");
                }
            }
            "--config-dir" | "-c" => {
                if let Some(path) = args.next() {
                    config_dir = Some(PathBuf::from(path));
                } else {
                    eprintln!("--config-dir requires a path");
                }
            }
            "--help" | "-h" => {
                println!("isaacsmith");
                println!("  --mods <path>         Scan this mods directory instead of the configured one");
                println!("  --config-dir <path>   Use this settings directory instead of the platform default");
                return Ok(());
            }
            _ => {}
        }
    }

    let mut manager = ModManager::new(config_dir)?;
    if mods_path.is_none() {
        manager.read_config()?;
    }
    manager.read_mods(mods_path.as_deref())?;

    let mut names: Vec<&String> = manager.mods().keys().collect();
    names.sort();
    for name in names {
        let record = &manager.mods()[name];
        let state = if record.disabled { "disabled" } else { "enabled" };
        println!(
            "{name}  id={} index={} {state}  {}",
            record.id,
            record.index,
            record.path.display()
        );
    }

    Ok(())
}
