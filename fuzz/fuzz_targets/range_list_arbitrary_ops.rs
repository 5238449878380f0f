#![no_main]

use boundkit::ds::RangeList;
use boundkit::ds::range_list::normalize_range;
use libfuzzer_sys::fuzz_target;

// Fuzz RangeList commands; lrange windows are checked against a Vec slice
fuzz_target!(|data: &[u8]| {
    let mut list: RangeList<u8> = RangeList::new();
    let mut model: Vec<u8> = Vec::new();

    for chunk in data.chunks_exact(3) {
        let (op, a, b) = (chunk[0], chunk[1], chunk[2]);
        match op % 7 {
            0 => {
                model.insert(0, a);
                assert_eq!(list.lpush(a), model.len());
            }
            1 => {
                model.push(a);
                assert_eq!(list.rpush(a), model.len());
            }
            2 => {
                let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                assert_eq!(list.lpop(), expected);
            }
            3 => assert_eq!(list.rpop(), model.pop()),
            4 => {
                let n = usize::from(a % 8);
                let n = n.min(model.len());
                let expected: Vec<u8> = model.drain(..n).collect();
                assert_eq!(list.lpop_n(usize::from(a % 8)), expected);
            }
            5 => {
                let n = usize::from(a % 8).min(model.len());
                let expected: Vec<u8> = model.split_off(model.len() - n);
                assert_eq!(list.rpop_n(usize::from(a % 8)), expected);
            }
            _ => {
                let start = isize::from(a as i8 % 20);
                let stop = isize::from(b as i8 % 20);
                let expected = match normalize_range(start, stop, model.len()) {
                    Some((first, last)) => model[first..=last].to_vec(),
                    None => Vec::new(),
                };
                assert_eq!(list.lrange(start, stop), expected);
            }
        }
        assert_eq!(list.llen(), model.len());
    }
});
