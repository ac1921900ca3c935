/// Storage released between two quota readings. A negative value means the usage grew while
/// the cleanup was running, for example because of concurrent pushes
pub fn measure_released(before: u64, after: u64) -> i128 {
    i128::from(before) - i128::from(after)
}
