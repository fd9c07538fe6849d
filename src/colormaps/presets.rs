//! Named colormap presets.
//!
//! Maps lowercase matplotlib colormap names to `colorgrad` preset gradients.

use colorgrad::Gradient;

/// Look up a preset gradient by lowercase name
pub fn gradient(name: &str) -> Option<Gradient> {
    let gradient = match name {
        // Sequential, single hue
        "blues" => colorgrad::blues(),
        "greens" => colorgrad::greens(),
        "greys" | "grays" => colorgrad::greys(),
        "oranges" => colorgrad::oranges(),
        "purples" => colorgrad::purples(),
        "reds" => colorgrad::reds(),

        // Sequential, multi hue
        "bugn" => colorgrad::bu_gn(),
        "bupu" => colorgrad::bu_pu(),
        "gnbu" => colorgrad::gn_bu(),
        "orrd" => colorgrad::or_rd(),
        "pubugn" => colorgrad::pu_bu_gn(),
        "pubu" => colorgrad::pu_bu(),
        "purd" => colorgrad::pu_rd(),
        "rdpu" => colorgrad::rd_pu(),
        "ylgnbu" => colorgrad::yl_gn_bu(),
        "ylgn" => colorgrad::yl_gn(),
        "ylorbr" => colorgrad::yl_or_br(),
        "ylorrd" => colorgrad::yl_or_rd(),

        // Perceptually uniform
        "viridis" => colorgrad::viridis(),
        "plasma" => colorgrad::plasma(),
        "inferno" => colorgrad::inferno(),
        "magma" => colorgrad::magma(),
        "cividis" => colorgrad::cividis(),
        "turbo" => colorgrad::turbo(),

        // Diverging
        "brbg" => colorgrad::br_bg(),
        "prgn" => colorgrad::pr_gn(),
        "piyg" => colorgrad::pi_yg(),
        "puor" => colorgrad::pu_or(),
        "rdbu" => colorgrad::rd_bu(),
        "rdgy" => colorgrad::rd_gy(),
        "rdylbu" => colorgrad::rd_yl_bu(),
        "rdylgn" => colorgrad::rd_yl_gn(),
        "spectral" => colorgrad::spectral(),

        // Cyclical and misc
        "rainbow" => colorgrad::rainbow(),
        "cubehelix" => colorgrad::cubehelix_default(),
        _ => return None,
    };
    Some(gradient)
}

/// Names accepted by [`gradient`], listed in the CLI help
pub const PRESET_NAMES: &[&str] = &[
    "Blues", "Greens", "Greys", "Oranges", "Purples", "Reds", "BuGn", "BuPu", "GnBu", "OrRd",
    "PuBuGn", "PuBu", "PuRd", "RdPu", "YlGnBu", "YlGn", "YlOrBr", "YlOrRd", "viridis", "plasma",
    "inferno", "magma", "cividis", "turbo", "BrBG", "PRGn", "PiYG", "PuOr", "RdBu", "RdGy",
    "RdYlBu", "RdYlGn", "Spectral", "rainbow", "cubehelix",
];
