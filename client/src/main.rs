fn main() {
    #[cfg(feature = "csr")]
    client::mount();
}
