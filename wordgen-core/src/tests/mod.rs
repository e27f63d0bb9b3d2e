use rand::RngCore;


/// Random source whose uniform draws are always `0.0`, so weighted sampling
/// always returns the first candidate with a positive weight.
pub(crate) struct ZeroRng;

impl RngCore for ZeroRng {
	fn next_u32(&mut self) -> u32 {
		0
	}

	fn next_u64(&mut self) -> u64 {
		0
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		dst.fill(0);
	}
}

/// Random source whose uniform draws are as close to `1.0` as possible, so
/// weighted sampling always returns the last candidate with a positive weight.
pub(crate) struct MaxRng;

impl RngCore for MaxRng {
	fn next_u32(&mut self) -> u32 {
		u32::MAX
	}

	fn next_u64(&mut self) -> u64 {
		u64::MAX
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		dst.fill(u8::MAX);
	}
}

/// Counts how many uniform draws were requested from the wrapped source.
pub(crate) struct CountingRng<R> {
	pub inner: R,
	pub draws: usize,
}

impl<R: RngCore> RngCore for CountingRng<R> {
	fn next_u32(&mut self) -> u32 {
		self.draws += 1;
		self.inner.next_u32()
	}

	fn next_u64(&mut self) -> u64 {
		self.draws += 1;
		self.inner.next_u64()
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		self.draws += 1;
		self.inner.fill_bytes(dst);
	}
}
