pub mod range_list;
pub mod ring_buffer;
pub mod slot_arena;
pub mod spsc;

pub use range_list::RangeList;
pub use ring_buffer::RingBuffer;
pub use slot_arena::{SlotArena, SlotId};
pub use spsc::{Consumer, Producer, SpscQueue, channel};
