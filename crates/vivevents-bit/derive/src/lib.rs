mod derive;

use proc_macro::TokenStream;

use crate::derive::handle_derive_bit;

/// Implements `vivevents_bit_mask::Bitable` for a fieldless enum and adds
/// an `ALL` constant listing the variants in declaration order.
#[proc_macro_derive(Bit)]
pub fn derive_bit(input: TokenStream) -> TokenStream {
    handle_derive_bit(input)
}
