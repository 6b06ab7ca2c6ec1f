//! Images command
//!
//! Resolves the catalog settings, runs one query, and prints the matching
//! images. `--ids-only` and `--json` expose the image IDs together with a
//! stable identifier of the query for tools that track changes.

use anyhow::{Context, Result};
use cloudinfo_core::RuntimeConfig;
use cloudinfo_images::{CatalogClient, Image, SearchParams};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use crate::cli::{CatalogArgs, ImagesArgs};
use crate::output;

#[derive(Tabled)]
struct ImageRow {
    id: String,
    name: String,
    published: String,
    state: String,
    #[tabled(rename = "replaced by")]
    replacement: String,
}

impl From<&Image> for ImageRow {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id.clone(),
            name: image.name.clone(),
            published: image
                .published_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| image.published_on.clone()),
            state: image.state.clone(),
            replacement: if image.replacement_id.is_empty() {
                image.replacement_name.clone()
            } else {
                image.replacement_id.clone()
            },
        }
    }
}

/// JSON output of a query
#[derive(Debug, Serialize)]
struct ImagesOutput<'a> {
    /// Stable identifier of the query parameters
    id: String,
    query: &'a SearchParams,
    ids: Vec<&'a str>,
    images: &'a [Image],
}

impl<'a> ImagesOutput<'a> {
    fn new(params: &'a SearchParams, images: &'a [Image]) -> Self {
        Self {
            id: params.query_id(),
            query: params,
            ids: images.iter().map(|i| i.id.as_str()).collect(),
            images,
        }
    }
}

fn search_params(config: &RuntimeConfig, args: &ImagesArgs) -> SearchParams {
    config
        .search_params(&args.cloud, &args.region)
        .with_state(args.state.to_string())
        .with_name_regex(args.name_regex.clone().unwrap_or_default())
        .with_sort_ascending(args.sort_ascending)
}

async fn query(client: &CatalogClient, params: &SearchParams) -> Result<Vec<Image>> {
    debug!("Reading image IDs: {:?}", params);
    client.get_images(params).await.with_context(|| {
        format!(
            "Failed to list {} images for {} in {}",
            params.state, params.cloud, params.region
        )
    })
}

pub async fn run(args: ImagesArgs, overrides: &CatalogArgs) -> Result<()> {
    let config = super::resolve_config(overrides)?;
    let client = super::catalog_client(&config)?;
    let params = search_params(&config, &args);

    let machine_output = args.json || args.ids_only;
    let spinner = (!machine_output).then(|| {
        output::spinner(&format!(
            "Querying {} images for {} in {}...",
            params.state, params.cloud, params.region
        ))
    });

    let result = query(&client, &params).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let images = result?;

    if args.json {
        let out = ImagesOutput::new(&params, &images);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if args.ids_only {
        for image in &images {
            println!("{}", image.id);
        }
    } else if images.is_empty() {
        output::warning("No images match the query");
    } else {
        let rows: Vec<ImageRow> = images.iter().map(ImageRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{}", table);
        println!("{} images", images.len());
    }

    Ok(())
}
