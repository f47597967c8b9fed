// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::table::CostTable;

/// Replays the back-pointers from the full capacity down to zero.
///
/// Returns how often each candidate was used, indexed like the candidate
/// list the table was built from, or `None` if the capacity is unreachable.
pub fn trace_counts(table: &CostTable, candidates_len: usize) -> Option<Vec<u64>> {
    table.optimum()?;

    let mut counts = vec![0u64; candidates_len];
    let mut cursor = table.capacity();
    while cursor > 0 {
        let step = table.back_step(cursor)?;
        counts[step.candidate()] += 1;
        cursor = step.predecessor();
    }
    Some(counts)
}
