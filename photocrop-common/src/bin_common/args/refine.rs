use crate::{subject::refine::refine, utils::imgutils::Mask};

use super::args_helper::args;

args! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    Refine {
        "Erode the classified subject this many times, to get rid of noise"
        refine_erode_iterations: u32 = 1;

        "Dilate the subject this many times after eroding it"
        refine_dilate_iterations: u32 = 1;
    }
}

impl RefineArgs {
    pub fn refine(self, mask: Mask) -> Mask {
        refine(
            mask,
            self.refine_erode_iterations,
            self.refine_dilate_iterations,
        )
    }
}
