use std::borrow::Cow;

/// Read-only line access supplied by the host buffer.
///
/// Lines are one-based and returned without their line terminator. The
/// engine only ever asks for a bounded window of lines around the reference
/// region.
pub trait TextSource {
    fn line_count(&self) -> u32;

    /// Text of `line`, or `None` when the host cannot supply it (for example
    /// past the end of the buffer).
    fn line(&self, line: u32) -> Option<Cow<'_, str>>;
}

impl TextSource for str {
    fn line_count(&self) -> u32 {
        self.split('\n').count() as u32
    }

    fn line(&self, line: u32) -> Option<Cow<'_, str>> {
        let idx = (line as usize).checked_sub(1)?;
        self.split('\n').nth(idx).map(Cow::Borrowed)
    }
}

impl TextSource for [String] {
    fn line_count(&self) -> u32 {
        self.len() as u32
    }

    fn line(&self, line: u32) -> Option<Cow<'_, str>> {
        let idx = (line as usize).checked_sub(1)?;
        self.get(idx).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn line_count(&self) -> u32 {
        (**self).line_count()
    }

    fn line(&self, line: u32) -> Option<Cow<'_, str>> {
        (**self).line(line)
    }
}
