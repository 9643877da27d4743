//! Entry point for the WASM application

fn main() {
    docstage::boot();
}
