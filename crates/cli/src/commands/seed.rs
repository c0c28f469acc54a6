use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde_json::json;

use shopfront_core::config::{AppConfig, LoadOptions};
use shopfront_core::domain::product::Product;

use crate::commands::CommandResult;

pub fn run(force: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    match write_demo_catalog(&config.catalog.data_path, force) {
        Ok(count) => CommandResult::success(
            "seed",
            format!(
                "wrote {count} demo products to `{}`",
                config.catalog.data_path.display()
            ),
        ),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn write_demo_catalog(path: &Path, force: bool) -> Result<usize, (&'static str, String, u8)> {
    if path.exists() && !force {
        return Err((
            "already_seeded",
            format!("`{}` already exists; pass --force to overwrite", path.display()),
            3,
        ));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|error| ("io", format!("could not create `{}`: {error}", parent.display()), 4u8))?;
        }
    }

    let products = demo_catalog();
    let raw = serde_json::to_string_pretty(&products)
        .map_err(|error| ("serialization", error.to_string(), 4u8))?;
    fs::write(path, raw)
        .map_err(|error| ("io", format!("could not write `{}`: {error}", path.display()), 4u8))?;

    Ok(products.len())
}

/// Deterministic demo catalog; same content on every run so seeded
/// environments are comparable.
fn demo_catalog() -> Vec<Product> {
    let mut products = vec![
        Product::new("p1", "Desk Lamp", Decimal::new(2450, 2), 10),
        Product::new("p2", "Notebook", Decimal::new(399, 2), 25),
        Product::new("p3", "Ceramic Mug", Decimal::new(1200, 2), 8),
        Product::new("p4", "Mechanical Keyboard", Decimal::new(8900, 2), 4),
        Product::new("p5", "Monitor Stand", Decimal::new(3475, 2), 6),
        Product::new("p6", "Cable Organizer", Decimal::new(650, 2), 40),
    ];

    let blurbs = [
        ("Warm LED desk lamp with a weighted base.", "/img/lamp.png"),
        ("A5 dotted notebook, 120 pages.", "/img/notebook.png"),
        ("350ml stoneware mug, dishwasher safe.", "/img/mug.png"),
        ("Tenkeyless board with tactile switches.", "/img/keyboard.png"),
        ("Bamboo stand, fits monitors up to 27\".", "/img/stand.png"),
        ("Pack of 8 reusable cable ties.", "/img/organizer.png"),
    ];
    for (product, (description, image)) in products.iter_mut().zip(blurbs) {
        product.extra.insert("description".to_string(), json!(description));
        product.extra.insert("image".to_string(), json!(image));
    }

    products
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use shopfront_core::domain::product::Product;

    use super::{demo_catalog, write_demo_catalog};

    #[test]
    fn seed_writes_a_parseable_catalog() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("data/products.json");

        let count = write_demo_catalog(&path, false).expect("seed should write");

        let raw = std::fs::read_to_string(&path).expect("seed file should read");
        let products: Vec<Product> = serde_json::from_str(&raw).expect("seed should parse");
        assert_eq!(products.len(), count);
        assert!(products.iter().all(|p| p.stock > 0));
    }

    #[test]
    fn seed_refuses_to_clobber_without_force() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("products.json");
        std::fs::write(&path, "[]").expect("existing file");

        let result = write_demo_catalog(&path, false);
        assert!(matches!(result, Err(("already_seeded", _, 3))));

        write_demo_catalog(&path, true).expect("force should overwrite");
        let raw = std::fs::read_to_string(&path).expect("seed file should read");
        assert_ne!(raw, "[]");
    }

    #[test]
    fn demo_catalog_is_deterministic() {
        assert_eq!(demo_catalog(), demo_catalog());
    }
}
