//! Embedded reference texts (public domain) used to train the trigram profiles.

use super::types::LanguageTag;

pub const LATIN: &str = "\
Gallia est omnis divisa in partes tres, quarum unam incolunt Belgae, aliam Aquitani, \
tertiam qui ipsorum lingua Celtae, nostra Galli appellantur. Hi omnes lingua, institutis, \
legibus inter se differunt. Gallos ab Aquitanis Garumna flumen, a Belgis Matrona et Sequana \
dividit. Horum omnium fortissimi sunt Belgae, propterea quod a cultu atque humanitate \
provinciae longissime absunt, minimeque ad eos mercatores saepe commeant atque ea quae ad \
effeminandos animos pertinent important, proximique sunt Germanis, qui trans Rhenum incolunt, \
quibuscum continenter bellum gerunt. Qua de causa Helvetii quoque reliquos Gallos virtute \
praecedunt, quod fere cotidianis proeliis cum Germanis contendunt. \
Quo usque tandem abutere, Catilina, patientia nostra? Quam diu etiam furor iste tuus nos \
eludet? Quem ad finem sese effrenata iactabit audacia? Nihilne te nocturnum praesidium \
Palati, nihil urbis vigiliae, nihil timor populi, nihil concursus bonorum omnium, nihil hic \
munitissimus habendi senatus locus, nihil horum ora voltusque moverunt? \
In principio creavit Deus caelum et terram. Terra autem erat inanis et vacua, et tenebrae \
erant super faciem abyssi, et spiritus Dei ferebatur super aquas. Dixitque Deus: Fiat lux. \
Et facta est lux. Et vidit Deus lucem quod esset bona, et divisit lucem a tenebris.";

pub const ENGLISH: &str = "\
In the beginning God created the heaven and the earth. And the earth was without form, and \
void; and darkness was upon the face of the deep. And the Spirit of God moved upon the face \
of the waters. And God said, Let there be light: and there was light. And God saw the light, \
that it was good: and God divided the light from the darkness. \
Four score and seven years ago our fathers brought forth on this continent, a new nation, \
conceived in Liberty, and dedicated to the proposition that all men are created equal. Now \
we are engaged in a great civil war, testing whether that nation, or any nation so conceived \
and so dedicated, can long endure. We are met on a great battle-field of that war. We have \
come to dedicate a portion of that field, as a final resting place for those who here gave \
their lives that that nation might live. \
This book is a short history of the town and the people who have lived there. It was written \
for readers who want to know how the old houses were built and why the river was so important \
to the trade of the region.";

pub const GERMAN: &str = "\
Am Anfang schuf Gott Himmel und Erde. Und die Erde war wüst und leer, und es war finster auf \
der Tiefe; und der Geist Gottes schwebte auf dem Wasser. Und Gott sprach: Es werde Licht! und \
es ward Licht. Und Gott sah, dass das Licht gut war. Da schied Gott das Licht von der \
Finsternis. \
In den alten Zeiten, wo das Wünschen noch geholfen hat, lebte ein König, dessen Töchter waren \
alle schön, aber die jüngste war so schön, dass die Sonne selber, die doch so vieles gesehen \
hat, sich verwunderte, so oft sie ihr ins Gesicht schien. Nahe bei dem Schlosse des Königs lag \
ein großer dunkler Wald, und in dem Walde unter einer alten Linde war ein Brunnen. \
Das Buch ist eine kurze Geschichte der Stadt und der Menschen, die dort gelebt haben. Es wurde \
für Leser geschrieben, die wissen wollen, wie die alten Häuser gebaut wurden und warum der \
Fluss für den Handel der Region so wichtig war.";

pub const FRENCH: &str = "\
Au commencement, Dieu créa les cieux et la terre. La terre était informe et vide: il y avait \
des ténèbres à la surface de l'abîme, et l'esprit de Dieu se mouvait au-dessus des eaux. Dieu \
dit: Que la lumière soit! Et la lumière fut. Dieu vit que la lumière était bonne; et Dieu \
sépara la lumière d'avec les ténèbres. \
Les hommes naissent et demeurent libres et égaux en droits. Les distinctions sociales ne \
peuvent être fondées que sur l'utilité commune. Le but de toute association politique est la \
conservation des droits naturels et imprescriptibles de l'homme. Ces droits sont la liberté, \
la propriété, la sûreté et la résistance à l'oppression. \
Ce livre est une courte histoire de la ville et des gens qui y ont vécu. Il a été écrit pour \
les lecteurs qui veulent savoir comment les vieilles maisons ont été construites et pourquoi \
la rivière était si importante pour le commerce de la région.";

pub const DUTCH: &str = "\
In het begin schiep God de hemel en de aarde. De aarde nu was woest en leeg, en duisternis was \
op de watervloed; en de Geest Gods zweefde op de wateren. En God zeide: Daar zij licht! en daar \
werd licht. En God zag het licht, dat het goed was; en God maakte scheiding tussen het licht en \
tussen de duisternis. \
Dit boek is een korte geschiedenis van de stad en de mensen die er hebben gewoond. Het werd \
geschreven voor lezers die willen weten hoe de oude huizen werden gebouwd en waarom de rivier \
zo belangrijk was voor de handel in de streek. \
In de zomer waren wij een week aan zee, en elke dag liepen wij over het strand naar het dorp \
om brood en vis te kopen. Mijn vader zei dat het water te koud was om te zwemmen, maar wij \
hebben het toch gedaan. Het is een mooi land met veel water, vele molens en oude bruggen.";

pub const ITALIAN: &str = "\
Nel mezzo del cammin di nostra vita mi ritrovai per una selva oscura, ché la diritta via era \
smarrita. Ahi quanto a dir qual era è cosa dura esta selva selvaggia e aspra e forte che nel \
pensier rinova la paura! Tant'è amara che poco è più morte; ma per trattar del ben ch'i' vi \
trovai, dirò de l'altre cose ch'i' v'ho scorte. \
Nel principio Dio creò i cieli e la terra. La terra era informe e vuota, e le tenebre \
coprivano la faccia dell'abisso, e lo spirito di Dio aleggiava sulla superficie delle acque. \
Dio disse: Sia la luce! E la luce fu. Dio vide che la luce era buona, e separò la luce dalle \
tenebre. \
Questo libro è una breve storia della città e delle persone che vi hanno vissuto. È stato \
scritto per i lettori che vogliono sapere come sono state costruite le vecchie case e perché \
il fiume era così importante per il commercio della regione.";

pub const GREEK: &str = "\
Ἐν ἀρχῇ ἦν ὁ λόγος, καὶ ὁ λόγος ἦν πρὸς τὸν θεόν, καὶ θεὸς ἦν ὁ λόγος. Οὗτος ἦν ἐν ἀρχῇ πρὸς \
τὸν θεόν. Πάντα δι᾽ αὐτοῦ ἐγένετο, καὶ χωρὶς αὐτοῦ ἐγένετο οὐδὲ ἕν ὃ γέγονεν. Ἐν αὐτῷ ζωὴ ἦν, \
καὶ ἡ ζωὴ ἦν τὸ φῶς τῶν ἀνθρώπων· καὶ τὸ φῶς ἐν τῇ σκοτίᾳ φαίνει, καὶ ἡ σκοτία αὐτὸ οὐ \
κατέλαβεν. \
Ἄνδρα μοι ἔννεπε, μοῦσα, πολύτροπον, ὃς μάλα πολλὰ πλάγχθη, ἐπεὶ Τροίης ἱερὸν πτολίεθρον \
ἔπερσε· πολλῶν δ᾽ ἀνθρώπων ἴδεν ἄστεα καὶ νόον ἔγνω. \
Αυτό το βιβλίο είναι μια σύντομη ιστορία της πόλης και των ανθρώπων που έζησαν εκεί. Γράφτηκε \
για τους αναγνώστες που θέλουν να μάθουν πώς χτίστηκαν τα παλιά σπίτια και γιατί το ποτάμι \
ήταν τόσο σημαντικό για το εμπόριο της περιοχής.";

/// Reference text per language, in `LanguageTag::ALL` order.
pub fn reference_texts() -> [(LanguageTag, &'static str); 7] {
    [
        (LanguageTag::Latin, LATIN),
        (LanguageTag::English, ENGLISH),
        (LanguageTag::German, GERMAN),
        (LanguageTag::French, FRENCH),
        (LanguageTag::Dutch, DUTCH),
        (LanguageTag::Italian, ITALIAN),
        (LanguageTag::Greek, GREEK),
    ]
}
