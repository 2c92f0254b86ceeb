// Example: a feed of variable-height cards over the simulated surface, fed from a mock
// paginated source.
use windowlist::ShallowEq;
use windowlist_reconcile::sim::{SimNode, SimSurface};
use windowlist_reconcile::{RenderError, VirtualList, VirtualListOptions};

const LOREM: &str = "Lorem ipsum is simply dummy text of the printing and typesetting \
    industry. It has been the industry's standard dummy text ever since the 1500s, when an \
    unknown printer took a galley of type and scrambled it to make a type specimen book. It \
    has survived not only five centuries, but also the leap into electronic typesetting, \
    remaining essentially unchanged.";

#[derive(Clone, Debug)]
struct FeedItem {
    name: String,
    image_url: String,
    description: String,
}

impl ShallowEq for FeedItem {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.image_url == other.image_url
            && self.description == other.description
    }
}

fn feed_item(index: usize) -> FeedItem {
    // Deterministic stand-in for the random description lengths a real feed would have.
    let skip = (index * 37) % 200;
    FeedItem {
        name: format!("Random name {index}"),
        image_url: format!("https://images.example/250x250?{index}"),
        description: LOREM[skip..].to_string(),
    }
}

fn feed_item_markup(item: &FeedItem) -> String {
    format!(
        "<div class=\"feed-item\">\
           <img src=\"{}\" alt=\"{}\">\
           <h3>{}</h3><p>{}</p>\
         </div>",
        item.image_url, item.name, item.name, item.description
    )
}

/// A page from the mock data source.
#[allow(dead_code)]
struct Page {
    size: usize,
    next: usize,
    prev: Option<usize>,
    chunk: Vec<FeedItem>,
}

/// Mock paginated source: the whole dataset lives in memory, `load` hands out slices.
struct PageSource {
    items: Vec<FeedItem>,
    page_size: usize,
}

impl PageSource {
    fn new(count: usize, page_size: usize) -> Self {
        Self {
            items: (0..count).map(feed_item).collect(),
            page_size,
        }
    }

    fn load(&self, start: usize, limit: Option<usize>) -> Page {
        let limit = limit.unwrap_or(self.page_size);
        let end = (start + limit).min(self.items.len());
        let chunk = self.items[start.min(end)..end].to_vec();
        Page {
            size: chunk.len(),
            next: start + limit,
            prev: start.checked_sub(limit),
            chunk,
        }
    }
}

fn main() -> Result<(), RenderError> {
    let source = PageSource::new(100, 100);
    let data = source.load(0, None).chunk;

    let options = VirtualListOptions::new(feed_item_markup, |item: &FeedItem, node: &mut SimNode| {
        node.markup = feed_item_markup(item);
    });
    let mut list = VirtualList::<FeedItem, SimSurface>::new(data, options);

    // Card height tracks the amount of text, like a real layout would.
    let mut surface = SimSurface::with_measure(|node| Some(80 + (node.markup.len() as u32 / 40) * 20));

    list.mount(&mut surface)?;
    list.on_viewport_resize(900);
    println!(
        "mounted: nodes={} track={}px",
        list.materialized(),
        surface.track_height()
    );

    for scroll_top in [0u64, 400, 1200, 2600, 5000] {
        list.on_scroll(scroll_top);
        list.tick(&mut surface)?;
        println!(
            "scroll={scroll_top:>5} nodes={:>2} created={:>3} removed={:>3} track={}px",
            list.materialized(),
            surface.created(),
            surface.removed(),
            surface.track_height()
        );
    }
    Ok(())
}
