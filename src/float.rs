use rustfft::{num_traits, FftNum};

pub trait Float:
    FftNum + num_traits::Float + num_traits::FloatConst + std::ops::AddAssign
{
}

impl<T: FftNum + num_traits::Float + num_traits::FloatConst + std::ops::AddAssign> Float for T {}
