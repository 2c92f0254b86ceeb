// Example: estimate-then-measure bookkeeping and window ranges.
use windowlist::MetadataStore;

fn main() {
    let mut store = MetadataStore::new(1_000_000, 250);
    println!("estimated track height = {}", store.total_height());
    println!("window at 123_456 = {:?}", store.window(123_456, 800, 2));

    // Measurements replace estimates index by index; offsets for later indexes follow.
    for i in 0..10 {
        store.set_height(i, 100 + (i as u32 % 3) * 40);
    }
    println!("offset_top(10) = {}", store.offset_top(10));
    println!("corrected track height = {}", store.total_height());
    println!("window at 300 = {:?}", store.window(300, 800, 2));
}
