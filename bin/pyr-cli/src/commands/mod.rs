// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared command plumbing: tracing setup, config loading, input parsing,
//! dtype dispatch helpers, and level printing.

pub mod build;
pub mod detail;
pub mod roundtrip;

use anyhow::Context;
use array_core::{DType, Element, NdArray, Shape};
use pyramid::{Pyramid, PyramidConfig};
use reduction_schemes::{ReductionScheme, SchemeKind};
use std::path::Path;

/// Initializes tracing based on `-v` count. `RUST_LOG` takes precedence.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the TOML config, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PyramidConfig> {
    match path {
        Some(p) => {
            let config = PyramidConfig::from_file(p)?;
            tracing::info!("loaded configuration from '{}'", p.display());
            Ok(config)
        }
        None => Ok(PyramidConfig::default()),
    }
}

/// Array and scheme selection shared by all subcommands. Flags override
/// the config file, which overrides built-in defaults.
#[derive(Debug, clap::Args)]
pub struct ArrayArgs {
    /// Shape as 'x'-separated extents, e.g. "3x5".
    #[arg(short, long)]
    pub shape: Option<String>,

    /// Comma-separated element values, row-major.
    #[arg(short, long)]
    pub data: Option<String>,

    /// JSON input file: { "shape": [...], "data": [...] }.
    #[arg(short, long, conflicts_with_all = ["shape", "data"])]
    pub input: Option<std::path::PathBuf>,

    /// Element type: i8, i16, i32, u8, u16, u32, f32, f64.
    #[arg(long)]
    pub dtype: Option<String>,

    /// Scheme: adjunction, sun-maragos, binomial.
    #[arg(long)]
    pub scheme: Option<String>,

    /// Binomial order (ignored by the morphological schemes).
    #[arg(long)]
    pub order: Option<usize>,

    /// Cap on the number of reductions.
    #[arg(long)]
    pub max_levels: Option<usize>,
}

#[derive(serde::Deserialize)]
struct InputFile {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Fully resolved invocation: source data plus scheme selection.
pub struct Resolved {
    pub shape: Shape,
    pub data: Vec<f64>,
    pub kind: SchemeKind,
    pub dtype: DType,
    pub order: usize,
    pub max_levels: Option<usize>,
}

/// Merges CLI flags over config defaults and loads the source array.
pub fn resolve(config: &PyramidConfig, args: &ArrayArgs) -> anyhow::Result<Resolved> {
    let (shape, data) = if let Some(path) = &args.input {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open input '{}'", path.display()))?;
        let parsed: InputFile = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("invalid input JSON '{}'", path.display()))?;
        (Shape::new(parsed.shape), parsed.data)
    } else {
        let shape_str = args
            .shape
            .as_deref()
            .context("--shape is required (or use --input)")?;
        let data_str = args
            .data
            .as_deref()
            .context("--data is required (or use --input)")?;
        (parse_shape(shape_str)?, parse_data(data_str)?)
    };

    if data.len() != shape.num_elements() {
        anyhow::bail!(
            "shape {} implies {} elements, got {}",
            shape,
            shape.num_elements(),
            data.len()
        );
    }

    let kind = SchemeKind::parse(args.scheme.as_deref().unwrap_or(&config.scheme))?;
    let dtype = DType::parse(args.dtype.as_deref().unwrap_or(&config.dtype))?;
    Ok(Resolved {
        shape,
        data,
        kind,
        dtype,
        order: args.order.unwrap_or(config.order),
        max_levels: args.max_levels.or(config.max_levels),
    })
}

fn parse_shape(s: &str) -> anyhow::Result<Shape> {
    let dims = s
        .split('x')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid extent '{part}' in shape '{s}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Shape::new(dims))
}

fn parse_data(s: &str) -> anyhow::Result<Vec<f64>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid element '{part}'"))
        })
        .collect()
}

/// Converts the parsed f64 data into the working element type.
pub fn to_array<T: Element>(resolved: &Resolved) -> anyhow::Result<NdArray<T>> {
    let data = resolved.data.iter().map(|&v| T::from_f64(v)).collect();
    Ok(NdArray::from_vec(resolved.shape.clone(), data)?)
}

/// Instantiates a morphological scheme, rejecting the binomial kind for
/// integer element types with a usable message.
pub fn morphological_scheme<T: Element>(
    kind: SchemeKind,
) -> anyhow::Result<Box<dyn ReductionScheme<T>>> {
    kind.morphological().ok_or_else(|| {
        anyhow::anyhow!(
            "scheme '{}' requires dtype f32 or f64, got {}",
            kind,
            T::DTYPE
        )
    })
}

/// Prints every level of a pyramid, truncating long rows of data.
pub fn print_levels<T: Element>(pyramid: &Pyramid<T>) {
    const MAX_SHOWN: usize = 24;
    for (i, level) in pyramid.levels().iter().enumerate() {
        let shown: Vec<String> = level
            .data()
            .iter()
            .take(MAX_SHOWN)
            .map(|v| v.to_string())
            .collect();
        let suffix = if level.data().len() > MAX_SHOWN {
            " ..."
        } else {
            ""
        };
        println!("   level {i} {}: {}{}", level.shape(), shown.join(" "), suffix);
    }
}
