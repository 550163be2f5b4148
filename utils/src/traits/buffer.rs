/// Collects input packets until a complete output unit can be produced.
///
/// `Ok(None)` means more input is needed.
pub trait GenericFragmentComposer {
    type In;
    type Out;
    type Error;
    fn enqueue(&mut self, packet: Self::In) -> Result<Option<Self::Out>, Self::Error>;
}
