//! Generate static files

use anyhow::Result;

use crate::events::RouteEvents;
use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let mut events = RouteEvents::new();
    let subscription = events.subscribe(|route| {
        tracing::info!("Generated route {}", route.path);
    });

    let generator = Generator::new(blog);
    let result = generator.generate(&events);

    events.unsubscribe(subscription);
    result?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
