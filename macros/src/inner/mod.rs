// Internal generators, only invoked from inside tola-shape
//
// - signature: Signature / Callable / DropLeading for fn pointers and dyn Fn
// - product: Introspect for tuples

pub mod product;
pub mod signature;
