// Example: windowing a large list, wheel input and a frame tick.
use virtual_list::{ListOptions, ScrollTarget, VirtualList};

fn main() {
    let rows: Vec<u32> = (0..1000).collect();
    let mut list = VirtualList::new(
        ListOptions::new(|row: &u32| *row)
            .with_height(400.0)
            .with_item_height(40.0)
            .with_on_visible_change(Some(|visible: &[u32], full: &[u32]| {
                println!(
                    "visible change: {}..={} of {}",
                    visible.first().copied().unwrap_or_default(),
                    visible.last().copied().unwrap_or_default(),
                    full.len()
                );
            })),
        rows,
    );
    list.attach_surface(|top: f64| println!("surface.scroll_top = {top}"));

    println!("mode={:?} range={:?}", list.mode(), list.visible_range());

    // Two wheel ticks inside one frame are applied together.
    let d1 = list.on_wheel(120.0, 0);
    let d2 = list.on_wheel(120.0, 8);
    println!("prevent_default: {} {}", d1.prevent_default(), d2.prevent_default());
    list.on_frame(16);
    println!("after wheel: top={} range={:?}", list.scroll_top(), list.visible_range());

    list.scroll_to(ScrollTarget::Offset(4000.0))
        .expect("finite offset");
    println!("holder={:?}", list.holder_style());
    println!("filler={:?}", list.filler_style());
    println!("thumb={:?}", list.scrollbar_thumb());

    let mut keys = Vec::new();
    list.for_each_rendered(|index, key, _| keys.push((index, key)));
    println!("rendered={keys:?}");
}
