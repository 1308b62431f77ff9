//! Garden type catalogue with interned identity and texture resolution
//!
//! Types are registered once per loaded session; re-registering a name
//! replaces the entry but keeps its interned id, so reloads do not
//! invalidate gardens already placed. Texture lookup walks the fallback
//! chain seasonal sprite, generic sprite, procedural default, logging each
//! step down at warn level.

use std::collections::HashMap;
use std::fmt;

use image::RgbaImage;

use crate::catalog::config::SceneConfig;
use crate::io::assets::AssetSource;
use crate::io::configuration::GARDEN_ASSET_DIR;
use crate::io::error::{GardenError, Result};
use crate::spatial::point::Size;
use crate::texture::generator::ProceduralTextureGenerator;

/// The four seasons a garden sprite can vary across
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Season {
    /// Spring variant
    Spring,
    /// Summer variant
    Summer,
    /// Fall variant
    Fall,
    /// Winter variant, the only season with a distinct procedural base
    Winter,
}

impl Season {
    /// All seasons in calendar order
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    /// Lowercase season key used in asset filenames
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }

    /// Parse a lowercase season key
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|season| season.as_str() == key)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two sprite layers every garden type carries
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextureLayer {
    /// Ground layer drawn below the border decoration
    Base,
    /// Detail layer drawn above the border decoration
    Feature,
}

impl TextureLayer {
    /// Lowercase layer key used in asset filenames
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Feature => "feature",
        }
    }
}

/// Interned identifier of a registered garden type
///
/// Compared by value; two gardens share a type iff their ids are equal,
/// which holds iff their type names are equal within one registry.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeId(u32);

/// Per-season sprites for both layers of a type
#[derive(Clone, Debug, Default)]
pub struct TypeTextures {
    /// Base layer sprites by season
    pub bases: HashMap<Season, RgbaImage>,
    /// Feature layer sprites by season
    pub features: HashMap<Season, RgbaImage>,
}

/// An immutable registered garden type
#[derive(Clone, Debug)]
pub struct GardenType {
    id: TypeId,
    name: String,
    author: Option<String>,
    size: Size,
    textures: TypeTextures,
}

impl GardenType {
    /// Interned identifier of this type
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Unique name of this type
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author credited in the scene configuration, if any
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Footprint size in grid cells
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The stored sprite for a layer and season, if one was resolved
    pub fn texture(&self, layer: TextureLayer, season: Season) -> Option<&RgbaImage> {
        match layer {
            TextureLayer::Base => self.textures.bases.get(&season),
            TextureLayer::Feature => self.textures.features.get(&season),
        }
    }

    /// The stored sprite for a layer and season, or the procedural default
    ///
    /// Types loaded through [`TypeRegistry::load_types`] carry sprites for
    /// every season, so this only reaches the generator for types
    /// registered bare.
    pub fn texture_or_default<'a>(
        &'a self,
        layer: TextureLayer,
        season: Season,
        generator: &'a mut ProceduralTextureGenerator,
    ) -> &'a RgbaImage {
        if let Some(texture) = self.texture(layer, season) {
            texture
        } else {
            match layer {
                TextureLayer::Base => generator.default_base(self.size, season),
                TextureLayer::Feature => generator.default_feature(self.size),
            }
        }
    }
}

impl PartialEq for GardenType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for GardenType {}

/// Catalogue of garden types, owned explicitly and passed by reference
///
/// Append-only for the lifetime of a session apart from full
/// reload-and-replace via [`TypeRegistry::clear`].
#[derive(Debug, Default)]
pub struct TypeRegistry {
    ids: HashMap<String, TypeId>,
    entries: Vec<GardenType>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous entry of the same name
    ///
    /// A replaced entry keeps its interned id so existing gardens stay
    /// valid across a reload.
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::InvalidSize`] if either footprint dimension
    /// is below one; the registry is left unchanged.
    pub fn register(
        &mut self,
        name: &str,
        size: Size,
        author: Option<String>,
        textures: TypeTextures,
    ) -> Result<TypeId> {
        if !size.is_valid() {
            return Err(GardenError::InvalidSize {
                name: name.to_string(),
                size,
            });
        }

        let id = self
            .ids
            .get(name)
            .copied()
            .unwrap_or(TypeId(self.entries.len() as u32));
        let entry = GardenType {
            id,
            name: name.to_string(),
            author,
            size,
            textures,
        };

        if let Some(slot) = self.entries.get_mut(id.0 as usize) {
            *slot = entry;
        } else {
            self.ids.insert(name.to_string(), id);
            self.entries.push(entry);
        }
        Ok(id)
    }

    /// Look up a type by its key
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::UnknownType`] if no type of that name is
    /// registered; callers treat the object as not a garden.
    pub fn get(&self, key: &str) -> Result<&GardenType> {
        self.ids
            .get(key)
            .and_then(|id| self.entries.get(id.0 as usize))
            .ok_or_else(|| GardenError::UnknownType {
                key: key.to_string(),
            })
    }

    /// Look up a type by its interned id
    pub fn by_id(&self, id: TypeId) -> Option<&GardenType> {
        self.entries.get(id.0 as usize)
    }

    /// Iterate over all registered types in registration order
    pub fn types(&self) -> impl Iterator<Item = &GardenType> {
        self.entries.iter()
    }

    /// Number of registered types
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no types are registered
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every registered type ahead of a full reload
    pub fn clear(&mut self) {
        self.ids.clear();
        self.entries.clear();
    }

    /// Register every type named in a scene configuration
    ///
    /// Sprites for all four seasons of both layers are resolved up front
    /// through the fallback chain. A type with an invalid footprint is
    /// logged at warn level and skipped; the remaining types still load.
    pub fn load_types(
        &mut self,
        config: &SceneConfig,
        assets: &dyn AssetSource,
        generator: &mut ProceduralTextureGenerator,
    ) {
        for (name, type_config) in &config.types {
            let size = Size::new(type_config.width, type_config.height);
            if !size.is_valid() {
                log::warn!("Could not load garden type {name}: invalid size {size}");
                continue;
            }

            let mut textures = TypeTextures::default();
            for season in Season::ALL {
                textures.bases.insert(
                    season,
                    resolve_layer(
                        name,
                        TextureLayer::Base,
                        season,
                        size,
                        type_config.use_default_base,
                        assets,
                        generator,
                    ),
                );
                textures.features.insert(
                    season,
                    resolve_layer(
                        name,
                        TextureLayer::Feature,
                        season,
                        size,
                        type_config.use_default_feature,
                        assets,
                        generator,
                    ),
                );
            }

            if let Err(error) =
                self.register(name, size, type_config.author.clone(), textures)
            {
                log::warn!("Could not load garden type {name}: {error}");
            }
        }
    }
}

/// Resolve one sprite layer through the fallback chain
///
/// Seasonal sprite, else generic sprite, else the procedural default;
/// each step down is recoverable and logged at warn level. The final
/// step cannot fail because it depends on no external files.
fn resolve_layer(
    name: &str,
    layer: TextureLayer,
    season: Season,
    size: Size,
    use_default: bool,
    assets: &dyn AssetSource,
    generator: &mut ProceduralTextureGenerator,
) -> RgbaImage {
    if !use_default {
        let layer_key = layer.as_str();
        let seasonal = format!("{GARDEN_ASSET_DIR}/{name}/{layer_key}_{season}.png");
        match assets.load(&seasonal) {
            Ok(texture) => return texture,
            Err(error) => {
                log::warn!("Sprite for {season} {layer_key} of {name} not usable: {error}");
            }
        }

        let generic = format!("{GARDEN_ASSET_DIR}/{name}/{layer_key}.png");
        match assets.load(&generic) {
            Ok(texture) => return texture,
            Err(error) => {
                log::warn!(
                    "Generic {layer_key} sprite of {name} not usable, fallback to default: {error}"
                );
            }
        }
    }

    match layer {
        TextureLayer::Base => generator.default_base(size, season).clone(),
        TextureLayer::Feature => generator.default_feature(size).clone(),
    }
}
