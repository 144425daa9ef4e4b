//! Pipeline stage bits.
//!
//! Stage rows store their stage as a bitmask matching `VkShaderStageFlagBits`,
//! so a library can be handed to a Vulkan loader without translation.

use bitflags::bitflags;

use crate::errors::{LibraryError, Result};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ShaderStage: u32 {
        const VERTEX                  = 0x01;
        const TESSELLATION_CONTROL    = 0x02;
        const TESSELLATION_EVALUATION = 0x04;
        const GEOMETRY                = 0x08;
        const FRAGMENT                = 0x10;
        const COMPUTE                 = 0x20;
    }
}

/// (stage, metadata name, file suffix, Vulkan bit name)
const STAGE_TABLE: [(ShaderStage, &str, &str, &str); 6] = [
    (ShaderStage::VERTEX, "vertex", "vert", "VK_SHADER_STAGE_VERTEX_BIT"),
    (
        ShaderStage::TESSELLATION_CONTROL,
        "tessellation_control",
        "tesc",
        "VK_SHADER_STAGE_TESSELLATION_CONTROL_BIT",
    ),
    (
        ShaderStage::TESSELLATION_EVALUATION,
        "tessellation_evaluation",
        "tese",
        "VK_SHADER_STAGE_TESSELLATION_EVALUATION_BIT",
    ),
    (ShaderStage::GEOMETRY, "geometry", "geom", "VK_SHADER_STAGE_GEOMETRY_BIT"),
    (ShaderStage::FRAGMENT, "fragment", "frag", "VK_SHADER_STAGE_FRAGMENT_BIT"),
    (ShaderStage::COMPUTE, "compute", "comp", "VK_SHADER_STAGE_COMPUTE_BIT"),
];

impl ShaderStage {
    /// Looks up a stage by the name used in shader metadata (`"fragment"`, ...).
    pub fn from_stage_name(name: &str) -> Result<Self> {
        STAGE_TABLE
            .iter()
            .find(|(_, n, _, _)| *n == name)
            .map(|(stage, ..)| *stage)
            .ok_or_else(|| LibraryError::UnknownStage(name.to_string()))
    }

    /// Looks up a stage by its conventional file suffix (`"frag"`, ...).
    #[must_use]
    pub fn from_abbreviation(suffix: &str) -> Option<Self> {
        STAGE_TABLE
            .iter()
            .find(|(_, _, abbr, _)| *abbr == suffix)
            .map(|(stage, ..)| *stage)
    }

    /// Metadata name of a single stage, `None` for empty or combined masks.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        self.entry().map(|(_, name, _, _)| *name)
    }

    /// Vulkan enumerator spelling of a single stage.
    #[must_use]
    pub fn vulkan_bit_name(self) -> Option<&'static str> {
        self.entry().map(|(_, _, _, vk)| *vk)
    }

    fn entry(self) -> Option<&'static (ShaderStage, &'static str, &'static str, &'static str)> {
        STAGE_TABLE.iter().find(|(stage, ..)| *stage == self)
    }
}
