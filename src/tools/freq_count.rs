use crate::error::CodecError;

/// Occurrence counts for each of the 256 byte values. Absent values have no entry: iteration
/// only visits symbols that occur, in ascending byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    distinct: usize,
}

impl FrequencyTable {
    /// Returns a frequency count of the input data.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0_u64; 256];
        data.iter().for_each(|&el| counts[el as usize] += 1);
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        Self { counts, distinct }
    }

    /// Rebuild a table from transmitted (symbol, frequency) pairs. Pairs must arrive in strictly
    /// ascending symbol order with non-zero frequencies, and the total must fit in a u64.
    pub fn from_entries(entries: &[(u8, u64)]) -> Result<Self, CodecError> {
        let mut counts = [0_u64; 256];
        let mut total = 0_u64;
        let mut last: Option<u8> = None;
        for &(sym, freq) in entries {
            if last.map_or(false, |l| sym <= l) {
                return Err(CodecError::corrupt(format!(
                    "symbol {} is out of order or repeated in the frequency table",
                    sym
                )));
            }
            if freq == 0 {
                return Err(CodecError::corrupt(format!(
                    "symbol {} has a zero frequency",
                    sym
                )));
            }
            total = total
                .checked_add(freq)
                .ok_or_else(|| CodecError::corrupt("frequency total overflows"))?;
            counts[sym as usize] = freq;
            last = Some(sym);
        }
        Ok(Self {
            counts,
            distinct: entries.len(),
        })
    }

    /// Count for one byte value, 0 if absent.
    pub fn get(&self, sym: u8) -> u64 {
        self.counts[sym as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// (symbol, frequency) for every symbol present, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }
}

#[cfg(test)]
mod test {
    use super::FrequencyTable;

    #[test]
    fn count_test() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)]
        );
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
        assert_eq!(table.get(b'z'), 0);
    }

    #[test]
    fn empty_test() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn full_range_test() {
        let data = (0..=255).collect::<Vec<u8>>();
        let table = FrequencyTable::from_bytes(&data);
        assert_eq!(table.len(), 256);
        assert!(table.iter().all(|(_, f)| f == 1));
    }

    #[test]
    fn from_entries_test() {
        let counted = FrequencyTable::from_bytes(b"abracadabra");
        let entries = counted.iter().collect::<Vec<_>>();
        assert_eq!(FrequencyTable::from_entries(&entries), Ok(counted));
    }

    #[test]
    fn from_entries_rejects_bad_tables() {
        assert!(FrequencyTable::from_entries(&[(b'b', 1), (b'a', 1)]).is_err());
        assert!(FrequencyTable::from_entries(&[(b'a', 1), (b'a', 1)]).is_err());
        assert!(FrequencyTable::from_entries(&[(b'a', 0)]).is_err());
        assert!(FrequencyTable::from_entries(&[(b'a', u64::MAX), (b'b', 1)]).is_err());
    }
}
