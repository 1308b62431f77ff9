//! Validates type registration, config parsing and the texture fallback chain

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use zengrid::GardenError;
use zengrid::catalog::SceneConfig;
use zengrid::catalog::config::PlacementKind;
use zengrid::catalog::registry::{Season, TextureLayer, TypeRegistry, TypeTextures};
use zengrid::io::assets::AssetSource;
use zengrid::spatial::placement::PlacedObject;
use zengrid::spatial::point::{Point, Size};
use zengrid::texture::ProceduralTextureGenerator;

/// In-memory asset source keyed by logical path
struct FakeAssets {
    entries: HashMap<String, RgbaImage>,
}

impl FakeAssets {
    fn new(entries: &[(&str, Rgba<u8>)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(path, color)| (path.to_string(), RgbaImage::from_pixel(4, 4, color)))
                .collect(),
        }
    }
}

impl AssetSource for FakeAssets {
    fn load(&self, path: &str) -> zengrid::Result<RgbaImage> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| GardenError::AssetMissing {
                path: path.to_string(),
            })
    }
}

fn corner_color(image: &RgbaImage) -> Option<Rgba<u8>> {
    image.get_pixel_checked(0, 0).copied()
}

#[test]
fn test_register_rejects_non_positive_footprints() {
    let mut registry = TypeRegistry::new();

    match registry.register("pond", Size::new(0, 2), None, TypeTextures::default()) {
        Err(GardenError::InvalidSize { name, size }) => {
            assert_eq!(name, "pond");
            assert_eq!(size, Size::new(0, 2));
        }
        other => unreachable!("expected InvalidSize, got {other:?}"),
    }
    assert!(registry.is_empty(), "rejected registration left a trace");
}

#[test]
fn test_reregistration_keeps_the_interned_id() {
    let mut registry = TypeRegistry::new();

    let Ok(first) = registry.register("pond", Size::new(2, 2), None, TypeTextures::default())
    else {
        unreachable!("valid size rejected");
    };
    let Ok(second) = registry.register(
        "pond",
        Size::new(3, 3),
        Some("riverbed".to_string()),
        TypeTextures::default(),
    ) else {
        unreachable!("valid size rejected");
    };

    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);

    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    assert_eq!(pond.size(), Size::new(3, 3), "entry itself was replaced");
    assert_eq!(pond.author(), Some("riverbed"));
    assert_eq!(registry.by_id(first).map(|entry| entry.name()), Some("pond"));
}

#[test]
fn test_unknown_key_lookup_is_an_error() {
    let registry = TypeRegistry::new();
    match registry.get("statue") {
        Err(GardenError::UnknownType { key }) => assert_eq!(key, "statue"),
        other => unreachable!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn test_season_keys_round_trip() {
    for season in Season::ALL {
        assert_eq!(Season::parse(season.as_str()), Some(season));
    }
    assert_eq!(Season::parse("monsoon"), None);
}

#[test]
fn test_scene_config_parses_types_and_placements() {
    let text = r#"{
        "types": {
            "pond": { "width": 2, "height": 2, "author": "riverbed" },
            "lantern": { "width": 1, "height": 1, "use_default_base": true }
        },
        "placements": [
            { "type": "pond", "x": 5, "y": 5 },
            { "type": "lantern", "x": 9, "y": 5, "kind": "furniture" }
        ]
    }"#;

    let config = match SceneConfig::from_json(text) {
        Ok(config) => config,
        Err(error) => unreachable!("valid config rejected: {error}"),
    };

    assert_eq!(config.types.len(), 2);
    let Some(pond) = config.types.get("pond") else {
        unreachable!("pond type missing");
    };
    assert_eq!((pond.width, pond.height), (2, 2));
    assert!(!pond.use_default_base, "defaults off unless requested");

    assert_eq!(config.placements.len(), 2);
    let Some(first) = config.placements.first() else {
        unreachable!("placement missing");
    };
    assert_eq!(first.kind, PlacementKind::Structure, "structure is the default kind");
    match first.to_object() {
        PlacedObject::Structure { type_key, tile } => {
            assert_eq!(type_key, "pond");
            assert_eq!(tile, Point::new(5, 5));
        }
        PlacedObject::Furniture { .. } => unreachable!("structure expected"),
    }

    let Some(second) = config.placements.get(1) else {
        unreachable!("placement missing");
    };
    assert_eq!(second.to_object().anchor(), Point::new(9, 5));
}

#[test]
fn test_scene_config_rejects_unknown_type_fields() {
    let text = r#"{
        "types": { "pond": { "width": 2, "height": 2, "depth": 3 } }
    }"#;
    match SceneConfig::from_json(text) {
        Err(GardenError::Config { reason, .. }) => {
            assert!(reason.contains("depth"), "reason must name the field: {reason}");
        }
        other => unreachable!("expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_types_prefers_the_seasonal_sprite() {
    let seasonal = Rgba([10, 20, 30, 255]);
    let generic = Rgba([40, 50, 60, 255]);
    let assets = FakeAssets::new(&[
        ("gardens/pond/base_winter.png", seasonal),
        ("gardens/pond/base.png", generic),
    ]);

    let config = match SceneConfig::from_json(
        r#"{ "types": { "pond": { "width": 2, "height": 2 } } }"#,
    ) {
        Ok(config) => config,
        Err(error) => unreachable!("valid config rejected: {error}"),
    };

    let mut registry = TypeRegistry::new();
    let mut generator = ProceduralTextureGenerator::new();
    registry.load_types(&config, &assets, &mut generator);

    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not loaded");
    };
    let winter = pond.texture(TextureLayer::Base, Season::Winter);
    assert_eq!(winter.and_then(corner_color), Some(seasonal));

    // No base_spring.png exists, so spring walks down to the generic sprite
    let spring = pond.texture(TextureLayer::Base, Season::Spring);
    assert_eq!(spring.and_then(corner_color), Some(generic));
}

#[test]
fn test_load_types_falls_back_to_the_procedural_default() {
    let assets = FakeAssets::new(&[]);
    let config = match SceneConfig::from_json(
        r#"{ "types": { "pond": { "width": 2, "height": 2 } } }"#,
    ) {
        Ok(config) => config,
        Err(error) => unreachable!("valid config rejected: {error}"),
    };

    let mut registry = TypeRegistry::new();
    let mut generator = ProceduralTextureGenerator::new();
    registry.load_types(&config, &assets, &mut generator);

    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not loaded");
    };
    let base = pond.texture(TextureLayer::Base, Season::Spring);
    assert_eq!(base.map(RgbaImage::dimensions), Some((32, 64)));

    let feature = pond.texture(TextureLayer::Feature, Season::Spring);
    assert!(
        feature.is_some_and(|image| image.pixels().all(|pixel| pixel.0[3] == 0)),
        "missing feature layer defaults to transparent"
    );
}

#[test]
fn test_use_default_base_skips_existing_sprites() {
    let authored = Rgba([99, 99, 99, 255]);
    let assets = FakeAssets::new(&[("gardens/pond/base.png", authored)]);
    let config = match SceneConfig::from_json(
        r#"{ "types": { "pond": { "width": 1, "height": 1, "use_default_base": true } } }"#,
    ) {
        Ok(config) => config,
        Err(error) => unreachable!("valid config rejected: {error}"),
    };

    let mut registry = TypeRegistry::new();
    let mut generator = ProceduralTextureGenerator::new();
    registry.load_types(&config, &assets, &mut generator);

    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not loaded");
    };
    let base = pond.texture(TextureLayer::Base, Season::Spring);
    assert_ne!(base.and_then(corner_color), Some(authored));
    assert_eq!(base.map(RgbaImage::dimensions), Some((16, 32)));
}

#[test]
fn test_load_types_skips_invalid_sizes_and_keeps_the_rest() {
    let assets = FakeAssets::new(&[]);
    let config = match SceneConfig::from_json(
        r#"{ "types": {
            "broken": { "width": 0, "height": 2 },
            "pond": { "width": 2, "height": 2 }
        } }"#,
    ) {
        Ok(config) => config,
        Err(error) => unreachable!("valid config rejected: {error}"),
    };

    let mut registry = TypeRegistry::new();
    let mut generator = ProceduralTextureGenerator::new();
    registry.load_types(&config, &assets, &mut generator);

    assert_eq!(registry.len(), 1);
    assert!(registry.get("broken").is_err());
    assert!(registry.get("pond").is_ok());
}

#[test]
fn test_bare_registration_resolves_defaults_lazily() {
    let mut registry = TypeRegistry::new();
    if registry
        .register("pond", Size::new(2, 2), None, TypeTextures::default())
        .is_err()
    {
        unreachable!("valid size rejected");
    }
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    assert!(pond.texture(TextureLayer::Base, Season::Spring).is_none());

    let mut generator = ProceduralTextureGenerator::new();
    let base = pond.texture_or_default(TextureLayer::Base, Season::Spring, &mut generator);
    assert_eq!(base.dimensions(), (32, 64));
}
