// Example: scroll-to over unmeasured rows, with a fake renderer reporting real heights.
use virtual_list::{ListOptions, ScrollAlign, ScrollTarget, ScrollToOutcome, VirtualList};

fn real_height(row: u32) -> f64 {
    // Rows vary between 24 and 96 pixels; the list only knows a 50px estimate.
    24.0 + f64::from((row * 37) % 73)
}

fn render(list: &mut VirtualList<u32, u32>) {
    let mut measured = Vec::new();
    list.for_each_rendered(|_, key, _| measured.push((key, real_height(key))));
    list.report_heights(measured);
}

fn main() {
    let mut list = VirtualList::new(
        ListOptions::new(|row: &u32| *row)
            .with_height(300.0)
            .with_item_height(50.0)
            .with_on_scroll_to_complete(Some(|outcome: ScrollToOutcome| {
                println!("scroll_to finished: {outcome:?}");
            })),
        (0..5000).collect(),
    );
    render(&mut list);

    list.scroll_to(ScrollTarget::index(4999).with_align(ScrollAlign::Bottom))
        .expect("finite offset");

    let mut now = 0;
    while list.is_scroll_to_pending() {
        render(&mut list);
        now += 16;
        list.on_frame(now);
        println!(
            "frame {now}: top={} scroll_height={:?}",
            list.scroll_top(),
            list.visible_range().scroll_height
        );
    }
    println!(
        "at bottom: {} (max_scroll_top={:?})",
        list.is_scroll_at_bottom(),
        list.max_scroll_top()
    );
}
