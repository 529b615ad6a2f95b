//! Surface descriptions for the scene's primitives.
//!
//! Materials are plain data: a base colour, a roughness and whether the surface
//! reacts to lights at all. The render engine turns them into per-object uniforms.

use std::collections::HashMap;

/// Converts a `0xRRGGBB` sRGB colour into linear RGB.
pub fn color_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Identifies one of the shared materials in a [`MaterialLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialId {
    Ground,
    Walls,
    Roof,
    Door,
    Bush,
    Grave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Ambient, directional and point lights apply.
    Lit,
    /// Base colour only; lights are ignored (fog still applies).
    Unlit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Linear RGB
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub shading: Shading,
}

impl Material {
    pub fn lit(name: &str, hex: u32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color: color_from_hex(hex),
            roughness: roughness.clamp(0.0, 1.0),
            shading: Shading::Lit,
        }
    }

    pub fn unlit(name: &str, hex: u32) -> Self {
        Self {
            name: name.to_string(),
            base_color: color_from_hex(hex),
            roughness: 1.0,
            shading: Shading::Unlit,
        }
    }
}

/// Shared material storage; objects refer to entries by [`MaterialId`].
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    materials: HashMap<MaterialId, Material>,
    fallback: Material,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            fallback: Material::lit("default", 0xcccccc, 1.0),
        }
    }

    /// The palette the haunted house is built with.
    pub fn haunted_house() -> Self {
        let mut library = Self::new();
        library.insert(MaterialId::Ground, Material::lit("ground", 0xff0000, 1.0));
        library.insert(MaterialId::Walls, Material::lit("walls", 0x0000ff, 1.0));
        library.insert(MaterialId::Roof, Material::lit("roof", 0x00ff00, 1.0));
        library.insert(MaterialId::Door, Material::lit("door", 0xffff00, 1.0));
        library.insert(MaterialId::Bush, Material::lit("bush", 0xffffff, 1.0));
        library.insert(MaterialId::Grave, Material::unlit("grave", 0xffffff));
        library
    }

    pub fn insert(&mut self, id: MaterialId, material: Material) {
        self.materials.insert(id, material);
    }

    /// Returns the material for `id`, or a neutral grey if it was never registered.
    pub fn get(&self, id: MaterialId) -> &Material {
        self.materials.get(&id).unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_conversion() {
        for c in color_from_hex(0xffffff) {
            assert_relative_eq!(c, 1.0, epsilon = 1e-5);
        }
        assert_eq!(color_from_hex(0x000000), [0.0, 0.0, 0.0]);

        let purple = color_from_hex(0x8800ff);
        assert_relative_eq!(purple[0], 0.2462, epsilon = 1e-3);
        assert_eq!(purple[1], 0.0);
        assert_relative_eq!(purple[2], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_library_fallback() {
        let library = MaterialLibrary::new();
        assert!(library.is_empty());
        assert_eq!(library.get(MaterialId::Door).name, "default");

        let library = MaterialLibrary::haunted_house();
        assert_eq!(library.len(), 6);
        assert_eq!(library.get(MaterialId::Grave).shading, Shading::Unlit);
        assert_eq!(library.get(MaterialId::Door).name, "door");
    }
}
