use image::RgbImage;

use crate::{
    subject::classify::{classify, PixelRules},
    utils::imgutils::Mask,
};

use super::args_helper::args;

args! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    Classify {
        "Pixels with all channels at or above this are candidate paper background"
        white_threshold: u8 = 225;

        "Pixels that are bluer than both red and green by more than this are printed text"
        blue_threshold: u8 = 50;

        "Radius of the square around a white pixel that is searched for content, to tell \
         white clothing from paper"
        clothing_neighbor_radius: u32 = 2;

        "White pixels with more than this many content pixels around them are clothing"
        clothing_neighbor_nonwhite_minimum: u32 = 4;

        "Count blue text as content when looking for clothing, which lets captions claim \
         the paper around them"
        clothing_counts_blue_text: bool = false;
    }
}

impl ClassifyArgs {
    pub fn rules(self) -> PixelRules {
        PixelRules {
            white_threshold: self.white_threshold,
            blue_threshold: self.blue_threshold,
            neighbor_radius: self.clothing_neighbor_radius,
            neighbor_nonwhite_minimum: self.clothing_neighbor_nonwhite_minimum,
            blue_text_is_content: self.clothing_counts_blue_text,
        }
    }

    pub fn classify(self, img: &RgbImage) -> Mask {
        classify(img, &self.rules())
    }
}
