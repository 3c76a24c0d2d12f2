use binpatch::{hex::hexdump, search, search_replace, Pattern};

pub fn main() {
    let mut image = vec![0u8; 32];
    image[10..14].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

    let needle = Pattern::from_ida("de ad ?? ef").expect("Should be valid signature");
    let patch = Pattern::from_ida("ca fe ?? be").expect("Should be valid signature");

    if let Some(pos) = search(&image, &needle, 0, 1) {
        println!("found needle at {pos}");
    }

    let patched = search_replace(&mut image, &needle, &patch, 1).expect("Lengths match");
    println!("patched {patched} bytes");
    println!("{}", hexdump(&image));
}
