//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::generator::Generator;
use crate::Blog;

/// Load every post and export the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let store = blog.load_store();
    tracing::info!("Loaded {} posts", store.len());

    Generator::new(blog)?.generate(&store)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
